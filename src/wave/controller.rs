//! Foreground configuration surface.
//!
//! [`WaveController`] owns the sample timer and publishes new generator
//! states. Every call validates first, reprograms the timer second and
//! publishes last, so a rejected call leaves both untouched.

use super::error::ConfigError;
use super::rate::{sample_rate_for, SampleRate};
use super::shared::SharedGenerator;
use super::state::{GeneratorState, Waveform};
use crate::config::SynthConfig;
use crate::hal::SampleTimer;
use crate::logging::{timestamp_us, LogStream};
use crate::{rt_debug, rt_info, rt_warn};

/// Configuration entry point, used from non-interrupt context only.
///
/// # Example
///
/// ```ignore
/// static GENERATOR: SharedGenerator = SharedGenerator::new();
///
/// let mut controller = WaveController::new(&GENERATOR, timer, &SynthConfig::default());
/// let rate = controller.configure_sine(1000.0, 4095)?;
/// assert_eq!(rate.period_ticks, 250); // 64 MHz timer clock
/// ```
pub struct WaveController<'a, T: SampleTimer> {
    generator: &'a SharedGenerator,
    timer: T,
    max_sample_rate_hz: u32,
    rate: Option<SampleRate>,
    log: Option<&'a LogStream>,
}

impl<'a, T: SampleTimer> WaveController<'a, T> {
    pub fn new(generator: &'a SharedGenerator, timer: T, config: &SynthConfig) -> Self {
        Self {
            generator,
            timer,
            max_sample_rate_hz: config.max_sample_rate_hz,
            rate: None,
            log: None,
        }
    }

    /// Log configuration changes to `log` (foreground stream).
    pub fn with_log(mut self, log: &'a LogStream) -> Self {
        self.log = Some(log);
        self
    }

    /// Sine at `frequency_hz`, peak `amplitude` (clamped to 4095), phase 0.
    pub fn configure_sine(
        &mut self,
        frequency_hz: f32,
        amplitude: u16,
    ) -> Result<SampleRate, ConfigError<T::Error>> {
        self.apply(Waveform::Sine, frequency_hz, amplitude)
    }

    /// Triangle at `frequency_hz` bouncing between 0 and `amplitude`,
    /// starting at 0 and rising.
    pub fn configure_triangle(
        &mut self,
        frequency_hz: f32,
        amplitude: u16,
    ) -> Result<SampleRate, ConfigError<T::Error>> {
        self.apply(Waveform::Triangle, frequency_hz, amplitude)
    }

    /// Sawtooth at `frequency_hz` rising from 0 to `amplitude`.
    pub fn configure_sawtooth(
        &mut self,
        frequency_hz: f32,
        amplitude: u16,
    ) -> Result<SampleRate, ConfigError<T::Error>> {
        self.apply(Waveform::Sawtooth, frequency_hz, amplitude)
    }

    /// Switch the output off. The tick keeps running and emits 0.
    pub fn stop(&mut self) {
        self.generator.update(|state| *state = state.stopped());
        if let Some(log) = self.log {
            rt_info!(log, timestamp_us(), "output off");
        }
    }

    /// Current generator state.
    pub fn state(&self) -> GeneratorState {
        self.generator.snapshot()
    }

    /// Timer period programmed by the last successful configuration.
    pub fn sample_rate(&self) -> Option<SampleRate> {
        self.rate
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn generator(&self) -> &'a SharedGenerator {
        self.generator
    }

    fn apply(
        &mut self,
        waveform: Waveform,
        frequency_hz: f32,
        amplitude: u16,
    ) -> Result<SampleRate, ConfigError<T::Error>> {
        let rate = match sample_rate_for(frequency_hz, self.timer.clock_hz(), self.max_sample_rate_hz) {
            Ok(rate) => rate,
            Err(e) => {
                if let Some(log) = self.log {
                    rt_warn!(log, timestamp_us(), "{} {} Hz rejected: {}", waveform.as_str(), frequency_hz, e);
                }
                return Err(e.into());
            }
        };

        let state = GeneratorState::new(waveform, amplitude, rate.period_ticks);
        if let Some(log) = self.log {
            if state.amplitude() != amplitude {
                rt_debug!(log, timestamp_us(), "amplitude {} clamped to {}", amplitude, state.amplitude());
            }
        }

        if let Err(e) = self.timer.set_period(rate.period_ticks) {
            if let Some(log) = self.log {
                rt_warn!(log, timestamp_us(), "timer period {} failed: {:?}", rate.period_ticks, e);
            }
            return Err(ConfigError::Timer(e));
        }

        self.generator.publish(state);
        self.rate = Some(rate);

        if let Some(log) = self.log {
            rt_info!(
                log,
                timestamp_us(),
                "{} {} Hz amp {} period {} ticks ({} Hz actual)",
                waveform.as_str(),
                frequency_hz,
                state.amplitude(),
                rate.period_ticks,
                rate.output_hz()
            );
        }

        Ok(rate)
    }
}
