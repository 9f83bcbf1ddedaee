//! MCP4922 dual 12-bit DAC driver
//!
//! SPI write-only interface plus an LDAC latch pin.
//! Reference: MCP4902/4912/4922 datasheet, "Write Command Register"
//!
//! ```text
//!  15    14    13    12    11 .. 0
//! [A/B] [BUF] [GA]  [SHDN] [D11 .. D0]
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::{DacTransport, TransportError};
use crate::sample::{Channel, DacValue};

/// Command word bit fields
#[allow(dead_code)]
mod bits {
    /// 1 = write DACB, 0 = write DACA
    pub const CHANNEL_B: u16 = 1 << 15;
    /// 1 = VREF input buffered
    pub const BUFFERED: u16 = 1 << 14;
    /// 1 = 1x gain, 0 = 2x gain
    pub const GAIN_1X: u16 = 1 << 13;
    /// 1 = output active, 0 = output shut down
    pub const ACTIVE: u16 = 1 << 12;
    pub const DATA_MASK: u16 = 0x0FFF;
}

/// Output gain selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gain {
    /// VOUT = VREF * D / 4096
    #[default]
    One,
    /// VOUT = 2 * VREF * D / 4096
    Two,
}

/// Mode bits sent with every frame.
///
/// The default (buffered, 1x) gives the `0x7` / `0xF` upper nibbles for
/// channels A / B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DacMode {
    pub buffered: bool,
    pub gain: Gain,
}

impl Default for DacMode {
    fn default() -> Self {
        Self {
            buffered: true,
            gain: Gain::One,
        }
    }
}

impl DacMode {
    #[inline]
    fn config_bits(&self, channel: Channel) -> u16 {
        let mut word = 0;
        if channel == Channel::B {
            word |= bits::CHANNEL_B;
        }
        if self.buffered {
            word |= bits::BUFFERED;
        }
        if self.gain == Gain::One {
            word |= bits::GAIN_1X;
        }
        word
    }
}

/// Build the 16-bit command word that drives `channel` to `value`.
#[inline]
pub fn command_word(channel: Channel, value: DacValue, mode: DacMode) -> u16 {
    mode.config_bits(channel) | bits::ACTIVE | (value.get() & bits::DATA_MASK)
}

/// Build the command word that shuts `channel` down (high-impedance output).
#[inline]
pub fn shutdown_word(channel: Channel, mode: DacMode) -> u16 {
    mode.config_bits(channel)
}

/// MCP4922 driver
///
/// `SPI` owns chip select: one `write` is one CS-framed 16-bit transfer,
/// MSB first. `LDAC` is pulsed low after each frame to commit the output.
pub struct Mcp4922<SPI, LDAC> {
    spi: SPI,
    ldac: LDAC,
    mode: DacMode,
}

impl<SPI, LDAC> Mcp4922<SPI, LDAC>
where
    SPI: SpiDevice,
    LDAC: OutputPin,
{
    /// Create new MCP4922 driver
    pub fn new(spi: SPI, ldac: LDAC, mode: DacMode) -> Self {
        Self { spi, ldac, mode }
    }

    /// Direct one-shot output, bypassing any waveform generation.
    ///
    /// Values above 4095 saturate.
    pub fn write(&mut self, channel: Channel, value: u16) -> Result<(), TransportError> {
        self.transmit(channel, DacValue::saturating(value))
    }

    /// Shut one output down. The next `write` to it wakes it up again.
    pub fn shutdown(&mut self, channel: Channel) -> Result<(), TransportError> {
        self.send(shutdown_word(channel, self.mode))
    }

    /// Change buffer/gain bits used by subsequent frames
    pub fn set_mode(&mut self, mode: DacMode) {
        self.mode = mode;
    }

    /// Get current mode
    pub fn mode(&self) -> DacMode {
        self.mode
    }

    /// Give the bus and pin back
    pub fn release(self) -> (SPI, LDAC) {
        (self.spi, self.ldac)
    }

    #[inline]
    fn send(&mut self, word: u16) -> Result<(), TransportError> {
        self.spi
            .write(&word.to_be_bytes())
            .map_err(|_| TransportError::Bus)?;

        self.ldac.set_low().map_err(|_| TransportError::Latch)?;
        self.ldac.set_high().map_err(|_| TransportError::Latch)
    }
}

impl<SPI, LDAC> DacTransport for Mcp4922<SPI, LDAC>
where
    SPI: SpiDevice,
    LDAC: OutputPin,
{
    #[inline]
    fn transmit(&mut self, channel: Channel, value: DacValue) -> Result<(), TransportError> {
        self.send(command_word(channel, value, self.mode))
    }
}
