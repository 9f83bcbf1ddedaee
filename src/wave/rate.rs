//! Frequency to timer-period conversion.
//!
//! Every waveform cycle spans [`TABLE_LEN`] ticks, so the tick rate is
//! `frequency_hz * 256` and the timer period is `clock_hz / tick_rate`
//! counter ticks, truncated. Anything that would not land in
//! `1..=u32::MAX` is rejected instead of wrapping the counter.

use super::error::FrequencyError;
use super::table::TABLE_LEN;

/// A timer period the hardware can actually run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRate {
    /// Timer period in counter ticks (>= 1).
    pub period_ticks: u32,
    /// Timer counter clock in Hz.
    pub clock_hz: u32,
}

impl SampleRate {
    /// Tick rate the timer will really produce.
    #[inline]
    pub fn tick_hz(&self) -> f32 {
        (self.clock_hz as f64 / self.period_ticks as f64) as f32
    }

    /// Output frequency the waveform will really have.
    #[inline]
    pub fn output_hz(&self) -> f32 {
        (self.clock_hz as f64 / self.period_ticks as f64 / TABLE_LEN as f64) as f32
    }
}

/// Tick rate needed for `frequency_hz` (one cycle per table length).
#[inline]
pub fn tick_rate_for(frequency_hz: f32) -> f64 {
    frequency_hz as f64 * TABLE_LEN as f64
}

/// Convert an output frequency to a timer period.
///
/// `max_sample_rate_hz` bounds the tick rate to what one SPI frame per
/// tick can sustain; pass `u32::MAX` for no bound.
pub fn sample_rate_for(
    frequency_hz: f32,
    clock_hz: u32,
    max_sample_rate_hz: u32,
) -> Result<SampleRate, FrequencyError> {
    if !frequency_hz.is_finite() {
        return Err(FrequencyError::NotFinite);
    }
    if frequency_hz <= 0.0 {
        return Err(FrequencyError::NotPositive);
    }

    let tick_rate = tick_rate_for(frequency_hz);
    if tick_rate > max_sample_rate_hz as f64 {
        return Err(FrequencyError::AboveMaxRate);
    }

    let ticks = clock_hz as f64 / tick_rate;
    if ticks < 1.0 {
        return Err(FrequencyError::PeriodTooShort);
    }
    if ticks >= 4_294_967_296.0 {
        return Err(FrequencyError::PeriodTooLong);
    }

    Ok(SampleRate {
        period_ticks: ticks as u32,
        clock_hz,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOCK: u32 = 64_000_000;

    #[test]
    fn test_1khz_at_64mhz() {
        let rate = sample_rate_for(1000.0, CLOCK, u32::MAX).unwrap();
        assert_eq!(rate.period_ticks, 250);
        assert_eq!(tick_rate_for(1000.0), 256_000.0);
        assert!((rate.output_hz() - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_period_truncates() {
        // 64e6 / (300 * 256) = 833.33
        let rate = sample_rate_for(300.0, CLOCK, u32::MAX).unwrap();
        assert_eq!(rate.period_ticks, 833);
        assert!(rate.output_hz() > 300.0);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(sample_rate_for(0.0, CLOCK, u32::MAX), Err(FrequencyError::NotPositive));
        assert_eq!(sample_rate_for(-5.0, CLOCK, u32::MAX), Err(FrequencyError::NotPositive));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(sample_rate_for(f32::NAN, CLOCK, u32::MAX), Err(FrequencyError::NotFinite));
        assert_eq!(sample_rate_for(f32::INFINITY, CLOCK, u32::MAX), Err(FrequencyError::NotFinite));
    }

    #[test]
    fn test_rejects_unrepresentable_periods() {
        // 1 MHz output needs a 256 MHz tick, faster than the 64 MHz counter
        assert_eq!(
            sample_rate_for(1_000_000.0, CLOCK, u32::MAX),
            Err(FrequencyError::PeriodTooShort)
        );
        // 1e-5 Hz needs 2.5e10 counter ticks per sample
        assert_eq!(sample_rate_for(1e-5, CLOCK, u32::MAX), Err(FrequencyError::PeriodTooLong));
    }

    #[test]
    fn test_rejects_above_max_rate() {
        assert_eq!(sample_rate_for(2000.0, CLOCK, 256_000), Err(FrequencyError::AboveMaxRate));
        assert!(sample_rate_for(1000.0, CLOCK, 256_000).is_ok());
    }
}
