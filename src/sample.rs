//! Module: sample
//!
//! Purpose: 12-bit DAC sample and output channel types shared by the
//! generator, the tick handler and the DAC driver.
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

/// Largest value the 12-bit DAC accepts.
pub const DAC_MAX: u16 = 4095;

/// Midscale code (zero signal for a bipolar reading of the output).
pub const DAC_MIDSCALE: u16 = 2048;

/// DAC output channel.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Channel {
    /// Output A (VOUTA).
    #[default]
    A = 0,
    /// Output B (VOUTB).
    B = 1,
}

impl Channel {
    /// Convert from raw u8 value. Anything other than 1 selects A.
    #[inline]
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::B,
            _ => Self::A,
        }
    }
}

impl From<Channel> for u8 {
    fn from(c: Channel) -> Self {
        c as u8
    }
}

/// A sample value guaranteed to fit in 12 bits.
///
/// Construction saturates at [`DAC_MAX`], matching the DAC's own
/// behaviour for out-of-range codes.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct DacValue(u16);

impl DacValue {
    /// Zero output.
    pub const ZERO: Self = Self(0);
    /// Midscale output.
    pub const MIDSCALE: Self = Self(DAC_MIDSCALE);
    /// Full-scale output.
    pub const MAX: Self = Self(DAC_MAX);

    /// Create a value, clamping anything above 4095.
    #[inline]
    pub const fn saturating(value: u16) -> Self {
        if value > DAC_MAX {
            Self(DAC_MAX)
        } else {
            Self(value)
        }
    }

    /// Create a value, returning `None` if it does not fit in 12 bits.
    #[inline]
    pub const fn new(value: u16) -> Option<Self> {
        if value > DAC_MAX {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Raw 12-bit code.
    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<DacValue> for u16 {
    fn from(v: DacValue) -> Self {
        v.0
    }
}
