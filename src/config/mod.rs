//! Module: config
//!
//! Purpose: Static configuration for the waveform generator.
//!
//! Architecture:
//! - `SynthConfig`: plain `Copy` value, built once at start-up
//! - Handed to the controller (rate limit) and the tick handler (channel)
//! - Nothing here is read through a global from the tick path
//!
//! Safety: Safe. No unsafe blocks.

use crate::hal::DacMode;
use crate::sample::Channel;

/// Default ceiling for the tick rate: one 16-bit SPI frame plus the LDAC
/// pulse has to fit in every period.
pub const DEFAULT_MAX_SAMPLE_RATE_HZ: u32 = 500_000;

/// Generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthConfig {
    /// DAC output driven by the tick handler.
    pub channel: Channel,
    /// Highest tick rate a configuration call may request.
    pub max_sample_rate_hz: u32,
    /// Buffer/gain bits sent with every frame.
    pub dac_mode: DacMode,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            channel: Channel::A,
            max_sample_rate_hz: DEFAULT_MAX_SAMPLE_RATE_HZ,
            dac_mode: DacMode::default(),
        }
    }
}

impl SynthConfig {
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_max_sample_rate(mut self, max_sample_rate_hz: u32) -> Self {
        self.max_sample_rate_hz = max_sample_rate_hz;
        self
    }

    pub fn with_dac_mode(mut self, dac_mode: DacMode) -> Self {
        self.dac_mode = dac_mode;
        self
    }
}
