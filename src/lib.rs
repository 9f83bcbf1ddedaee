//! # mcp4922-wavegen
//!
//! Timer-driven sine/triangle/sawtooth synthesizer for the MCP4922 DAC.
//!
//! ## Architecture
//!
//! Two execution contexts share one [`SharedGenerator`]:
//! - Foreground: [`WaveController`] validates a request, reprograms the
//!   sample timer and publishes a fresh [`GeneratorState`]
//! - Tick: [`TickHandler`] advances the state by one sample and sends one
//!   SPI frame per timer period
//!
//! The tick path never blocks beyond the SPI transfer, never allocates and
//! reports failures through [`FaultState`] instead of returning early from
//! the timeline.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod fault;
pub mod hal;
pub mod log_globals;
pub mod logging;
pub mod sample;
pub mod uart_logger;
pub mod wave;

pub use config::SynthConfig;
pub use fault::{FaultCode, FaultState};
pub use hal::{DacTransport, Mcp4922, SampleTimer, TransportError};
pub use log_globals::{FG_LOG_STREAM, TICK_LOG_STREAM};
pub use sample::{Channel, DacValue};
pub use wave::{GeneratorState, SharedGenerator, TickHandler, TickStats, WaveController, Waveform};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");
