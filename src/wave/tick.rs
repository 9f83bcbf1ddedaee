//! Per-tick advance-and-emit.
//!
//! Runs once per timer period in the tick context. One state advance, one
//! frame, no retry: a failed frame is recorded in [`FaultState`] and
//! [`TickStats`] and the tick returns, so the timeline never stalls.

use core::sync::atomic::{AtomicU16, AtomicU32, Ordering};

use super::shared::SharedGenerator;
use crate::fault::{FaultCode, FaultState};
use crate::hal::{DacTransport, TransportError};
use crate::logging::LogStream;
use crate::rt_error;
use crate::sample::{Channel, DacValue};

/// Tick counters, readable from the foreground at any time.
pub struct TickStats {
    ticks: AtomicU32,
    sent: AtomicU32,
    failures: AtomicU32,
    /// Last value the DAC actually latched.
    last_sample: AtomicU16,
}

impl TickStats {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            sent: AtomicU32::new(0),
            failures: AtomicU32::new(0),
            last_sample: AtomicU16::new(0),
        }
    }

    /// Ticks run so far (wraps).
    #[inline]
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Frames that reached the DAC.
    #[inline]
    pub fn sent(&self) -> u32 {
        self.sent.load(Ordering::Relaxed)
    }

    /// Frames lost to transport errors.
    #[inline]
    pub fn failures(&self) -> u32 {
        self.failures.load(Ordering::Relaxed)
    }

    /// What the output is holding right now. A failed tick leaves this at
    /// the previous good value, which is what the DAC keeps driving.
    #[inline]
    pub fn last_sample(&self) -> DacValue {
        DacValue::saturating(self.last_sample.load(Ordering::Acquire))
    }

    pub fn snapshot(&self) -> TickStatsSnapshot {
        TickStatsSnapshot {
            ticks: self.ticks(),
            sent: self.sent(),
            failures: self.failures(),
            last_sample: self.last_sample(),
        }
    }
}

impl Default for TickStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickStatsSnapshot {
    pub ticks: u32,
    pub sent: u32,
    pub failures: u32,
    pub last_sample: DacValue,
}

/// The tick-context half of the generator.
///
/// # Example
///
/// ```ignore
/// static GENERATOR: SharedGenerator = SharedGenerator::new();
/// static FAULT: FaultState = FaultState::new();
/// static STATS: TickStats = TickStats::new();
///
/// let mut handler = TickHandler::new(&GENERATOR, dac, Channel::A, &FAULT, &STATS);
///
/// // From the timer interrupt (or the task it wakes):
/// if handler.on_tick().is_err() {
///     // already recorded in FAULT and STATS
/// }
/// ```
pub struct TickHandler<'a, D> {
    generator: &'a SharedGenerator,
    dac: D,
    channel: Channel,
    fault: &'a FaultState,
    stats: &'a TickStats,
    log: Option<&'a LogStream>,
}

impl<'a, D: DacTransport> TickHandler<'a, D> {
    pub fn new(
        generator: &'a SharedGenerator,
        dac: D,
        channel: Channel,
        fault: &'a FaultState,
        stats: &'a TickStats,
    ) -> Self {
        Self {
            generator,
            dac,
            channel,
            fault,
            stats,
            log: None,
        }
    }

    /// Report transport faults to `log` (tick stream).
    pub fn with_log(mut self, log: &'a LogStream) -> Self {
        self.log = Some(log);
        self
    }

    /// Advance the generator by one sample and send it.
    ///
    /// # Returns
    ///
    /// - `Ok(sample)` - sample latched on the output
    /// - `Err(FaultCode)` - frame lost, fault recorded, output unchanged
    ///
    /// # Timing
    ///
    /// One critical section around the state advance, then exactly one
    /// transmit. Never retries, never allocates.
    #[inline]
    pub fn on_tick(&mut self) -> Result<DacValue, FaultCode> {
        let sample = self.generator.advance();
        let tick = self.stats.ticks.fetch_add(1, Ordering::Relaxed);

        match self.dac.transmit(self.channel, sample) {
            Ok(()) => {
                self.stats.sent.fetch_add(1, Ordering::Relaxed);
                self.stats.last_sample.store(sample.get(), Ordering::Release);
                Ok(sample)
            }
            Err(e) => {
                let code = FaultCode::from(e);
                let first = !self.fault.is_active();
                self.fault.set(code, sample.get() as u32);
                self.stats.failures.fetch_add(1, Ordering::Relaxed);

                // One line per fault episode, not per tick
                if first {
                    if let Some(log) = self.log {
                        rt_error!(log, tick as i64, "tick {}: {}, sample {} lost", tick, e, sample.get());
                    }
                }
                Err(code)
            }
        }
    }

    /// Raw one-shot write that bypasses the generator state.
    ///
    /// Does not count as a tick. Only call from the tick context (or with
    /// ticks stopped), since it shares the transport with [`Self::on_tick`].
    pub fn write_raw(&mut self, channel: Channel, value: u16) -> Result<(), TransportError> {
        self.dac.transmit(channel, DacValue::saturating(value))
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn dac_mut(&mut self) -> &mut D {
        &mut self.dac
    }

    /// Give the transport back
    pub fn into_dac(self) -> D {
        self.dac
    }
}
