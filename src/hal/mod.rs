//! Hardware Abstraction Layer for the waveform generator.
//!
//! Thin seams around the two collaborators of the tick path.
//! Synthesis logic stays in [`crate::wave`], HAL is just I/O.

pub mod mcp4922;
pub mod timer;

use core::fmt;

use crate::sample::{Channel, DacValue};

pub use mcp4922::{command_word, DacMode, Gain, Mcp4922};
pub use timer::SampleTimer;

/// DAC transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// SPI transfer (including chip select) failed.
    Bus,
    /// LDAC latch pulse could not be driven.
    Latch,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => f.write_str("SPI bus error"),
            Self::Latch => f.write_str("LDAC latch error"),
        }
    }
}

/// Sends one 12-bit value to one DAC channel and commits it to the output.
///
/// # Contract
///
/// Bounded-time and synchronous: returns once the frame is clocked out and
/// latched, well inside one tick period at the maximum sample rate.
pub trait DacTransport {
    fn transmit(&mut self, channel: Channel, value: DacValue) -> Result<(), TransportError>;
}

impl<T: DacTransport + ?Sized> DacTransport for &mut T {
    #[inline]
    fn transmit(&mut self, channel: Channel, value: DacValue) -> Result<(), TransportError> {
        (**self).transmit(channel, value)
    }
}
