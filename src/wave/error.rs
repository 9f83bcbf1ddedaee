//! Configuration error types

use core::fmt;

/// Why a requested frequency cannot be programmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyError {
    /// Frequency is zero or negative.
    NotPositive,
    /// Frequency is NaN or infinite.
    NotFinite,
    /// Tick rate exceeds the configured maximum sample rate.
    AboveMaxRate,
    /// Tick rate is faster than one timer counter tick.
    PeriodTooShort,
    /// Timer period does not fit the 32-bit counter.
    PeriodTooLong,
}

impl FrequencyError {
    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotPositive => "frequency must be positive",
            Self::NotFinite => "frequency must be finite",
            Self::AboveMaxRate => "sample rate above configured maximum",
            Self::PeriodTooShort => "timer period shorter than one tick",
            Self::PeriodTooLong => "timer period exceeds 32-bit counter",
        }
    }
}

impl fmt::Display for FrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error returned by the waveform configuration calls.
///
/// `E` is the timer collaborator's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError<E> {
    /// The requested frequency was rejected; nothing was changed.
    Frequency(FrequencyError),
    /// The timer refused the new period; nothing was changed.
    Timer(E),
}

impl<E> From<FrequencyError> for ConfigError<E> {
    fn from(e: FrequencyError) -> Self {
        ConfigError::Frequency(e)
    }
}

impl<E: fmt::Debug> fmt::Display for ConfigError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Frequency(e) => write!(f, "invalid frequency: {}", e),
            ConfigError::Timer(e) => write!(f, "timer error: {:?}", e),
        }
    }
}
