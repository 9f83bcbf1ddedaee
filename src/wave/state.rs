//! Generator state and the per-tick advance step.
//!
//! [`GeneratorState`] is a small `Copy` value. Configuration builds a complete
//! new state and publishes it in one go; the tick path copies it, advances it
//! by one sample and writes it back. Nothing here touches hardware, so the
//! whole synthesis algorithm is testable on host.
//!
//! # Ramp arithmetic
//!
//! Triangle and sawtooth ramps run on a Q16.16 fixed-point accumulator
//! (`level`) with a signed per-tick increment (`step`). Because the table
//! length is a power of two, `amplitude / 128` and `amplitude / 256` are
//! exact in Q16.16. The emitted sample is always `floor(level)`.

use super::table::{lookup, TABLE_LEN};
use crate::sample::{DacValue, DAC_MAX};

/// Fractional bits of the ramp accumulator.
pub const FRAC_BITS: u32 = 16;

/// Selected waveform.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Waveform {
    /// Output held at 0.
    #[default]
    Off = 0,
    /// Table-driven sine.
    Sine = 1,
    /// Symmetric ramp bouncing between 0 and the amplitude.
    Triangle = 2,
    /// Rising ramp that snaps back to 0 at the amplitude.
    Sawtooth = 3,
}

impl Waveform {
    /// Short lowercase name, used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Waveform::Off => "off",
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
        }
    }
}

/// Clamp a requested amplitude to the DAC range.
#[inline]
pub const fn clamp_amplitude(amplitude: u16) -> u16 {
    if amplitude > DAC_MAX {
        DAC_MAX
    } else {
        amplitude
    }
}

/// Complete synthesis state for one output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorState {
    waveform: Waveform,
    /// Peak output, 0..=4095.
    amplitude: u16,
    /// Sine table position, always < TABLE_LEN.
    phase_index: usize,
    /// Ramp accumulator (Q16.16), within [0, amplitude] between ticks.
    level: i32,
    /// Ramp increment per tick (Q16.16). Negative while a triangle falls.
    step: i32,
    /// Timer period the state was configured for, in counter ticks.
    period_ticks: u32,
}

impl GeneratorState {
    /// Idle state: no waveform, full-scale amplitude, no timer period yet.
    pub const OFF: Self = Self {
        waveform: Waveform::Off,
        amplitude: DAC_MAX,
        phase_index: 0,
        level: 0,
        step: 0,
        period_ticks: 0,
    };

    /// Fresh state for `waveform`, with progress at its start point.
    ///
    /// `amplitude` is clamped to 4095.
    pub const fn new(waveform: Waveform, amplitude: u16, period_ticks: u32) -> Self {
        let amplitude = clamp_amplitude(amplitude);
        let peak = (amplitude as i32) << FRAC_BITS;
        let step = match waveform {
            // Full up-down bounce spans one table length.
            Waveform::Triangle => peak / (TABLE_LEN as i32 / 2),
            Waveform::Sawtooth => peak / TABLE_LEN as i32,
            Waveform::Sine | Waveform::Off => 0,
        };

        Self {
            waveform,
            amplitude,
            phase_index: 0,
            level: 0,
            step,
            period_ticks,
        }
    }

    /// Same amplitude and timer period, waveform switched off.
    pub const fn stopped(self) -> Self {
        Self::new(Waveform::Off, self.amplitude, self.period_ticks)
    }

    #[inline]
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    #[inline]
    pub fn amplitude(&self) -> u16 {
        self.amplitude
    }

    #[inline]
    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Current ramp level, floored to a DAC code.
    #[inline]
    pub fn level(&self) -> u16 {
        (self.level >> FRAC_BITS) as u16
    }

    /// Raw Q16.16 ramp accumulator.
    #[inline]
    pub fn level_raw(&self) -> i32 {
        self.level
    }

    /// Raw Q16.16 ramp increment.
    #[inline]
    pub fn step_raw(&self) -> i32 {
        self.step
    }

    #[inline]
    pub fn period_ticks(&self) -> u32 {
        self.period_ticks
    }

    /// Compute the next sample and advance the progress state by one tick.
    ///
    /// # Timing
    ///
    /// O(1), no division except the sine scaling below full scale, no
    /// allocation.
    #[inline]
    pub fn advance(&mut self) -> DacValue {
        match self.waveform {
            Waveform::Off => DacValue::ZERO,

            Waveform::Sine => {
                let raw = lookup(self.phase_index);
                let value = if self.amplitude == DAC_MAX {
                    raw
                } else {
                    // Truncating division: floor(raw * amplitude / 4095)
                    ((raw as u32 * self.amplitude as u32) / DAC_MAX as u32) as u16
                };
                self.phase_index = (self.phase_index + 1) & (TABLE_LEN - 1);
                DacValue::saturating(value)
            }

            Waveform::Triangle => {
                let peak = self.peak();
                self.level += self.step;
                if self.level >= peak {
                    self.level = peak;
                    self.step = -self.step;
                } else if self.level <= 0 {
                    self.level = 0;
                    self.step = -self.step;
                }
                DacValue::saturating(self.level())
            }

            Waveform::Sawtooth => {
                self.level += self.step;
                if self.level >= self.peak() {
                    self.level = 0;
                }
                DacValue::saturating(self.level())
            }
        }
    }

    #[inline]
    fn peak(&self) -> i32 {
        (self.amplitude as i32) << FRAC_BITS
    }
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self::OFF
    }
}
