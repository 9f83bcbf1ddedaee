//! Waveform synthesis
//!
//! Architecture:
//! - Sine table: 256 precomputed 12-bit points, read-only
//! - Generator state: one `Copy` value, advanced once per tick
//! - Shared generator: critical-section guard between foreground and tick
//! - Controller (foreground) publishes new states and programs the timer
//! - Tick handler (interrupt side) advances the state and sends one frame

pub mod controller;
pub mod error;
pub mod rate;
pub mod shared;
pub mod state;
pub mod table;
pub mod tick;

pub use controller::WaveController;
pub use error::{ConfigError, FrequencyError};
pub use rate::{sample_rate_for, SampleRate};
pub use shared::SharedGenerator;
pub use state::{clamp_amplitude, GeneratorState, Waveform};
pub use table::{lookup, SINE_TABLE, TABLE_LEN};
pub use tick::{TickHandler, TickStats, TickStatsSnapshot};
