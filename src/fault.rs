//! Fault state for the tick path.
//!
//! The tick handler cannot retry or block: a failed frame is reported here
//! and the tick returns. The foreground polls [`FaultState`] and decides
//! what to do (stop the output or re-init the bus).

use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::hal::TransportError;

/// What went wrong on the tick path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    None = 0,
    /// SPI transfer failed; the sample never reached the DAC.
    Bus = 1,
    /// Frame went out but the LDAC pulse failed; output not committed.
    Latch = 2,
}

impl FaultCode {
    /// Decode a stored code. Unknown values read as `None`.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::Bus,
            2 => FaultCode::Latch,
            _ => FaultCode::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::Bus => "bus",
            FaultCode::Latch => "latch",
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TransportError> for FaultCode {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Bus => FaultCode::Bus,
            TransportError::Latch => FaultCode::Latch,
        }
    }
}

/// Latest tick fault plus a lifetime counter.
///
/// Written by the tick context only. The foreground reads it, and clears it
/// either with [`clear`](Self::clear) or by consuming it with
/// [`take`](Self::take).
///
/// # Usage
///
/// ```ignore
/// static FAULT: FaultState = FaultState::new();
///
/// // Tick context:
/// if let Err(e) = dac.transmit(channel, sample) {
///     FAULT.set(e.into(), sample.get() as u32);
/// }
///
/// // Foreground:
/// if let Some(fault) = FAULT.take() {
///     controller.stop();
/// }
/// ```
pub struct FaultState {
    active: AtomicBool,
    code: AtomicU8,
    /// Sample that failed to go out.
    data: AtomicU32,
    /// Faults since boot. `clear` and `take` leave it alone.
    count: AtomicU32,
}

impl FaultState {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(FaultCode::None as u8),
            data: AtomicU32::new(0),
            count: AtomicU32::new(0),
        }
    }

    /// Record a fault. The `active` store comes last, so a reader that sees
    /// it also sees the matching code and data.
    #[inline]
    pub fn set(&self, code: FaultCode, data: u32) {
        self.code.store(code as u8, Ordering::Relaxed);
        self.data.store(data, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Code of the latest fault, `None` if there never was one.
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn data(&self) -> u32 {
        self.data.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn clear(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Clear the active flag and return what it was guarding.
    ///
    /// `None` if no fault was pending. A fault raised after the swap stays
    /// pending for the next call.
    pub fn take(&self) -> Option<FaultSnapshot> {
        if !self.active.swap(false, Ordering::AcqRel) {
            return None;
        }
        Some(FaultSnapshot {
            active: true,
            code: self.code(),
            data: self.data(),
            count: self.count(),
        })
    }

    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            active: self.is_active(),
            code: self.code(),
            data: self.data(),
            count: self.count(),
        }
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultSnapshot {
    pub active: bool,
    pub code: FaultCode,
    /// Sample that failed to go out.
    pub data: u32,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let fault = FaultState::new();
        assert!(!fault.is_active());
        assert_eq!(fault.code(), FaultCode::None);

        fault.set(FaultCode::Bus, 2048);
        assert!(fault.is_active());
        assert_eq!(fault.code(), FaultCode::Bus);
        assert_eq!(fault.data(), 2048);

        fault.clear();
        assert!(!fault.is_active());
        // History survives the clear
        assert_eq!(fault.count(), 1);
        assert_eq!(fault.code(), FaultCode::Bus);
    }

    #[test]
    fn test_take_consumes_once() {
        let fault = FaultState::new();
        assert_eq!(fault.take(), None);

        fault.set(FaultCode::Latch, 17);
        fault.set(FaultCode::Bus, 99);

        let taken = fault.take().unwrap();
        assert_eq!(taken.code, FaultCode::Bus);
        assert_eq!(taken.data, 99);
        assert_eq!(taken.count, 2);

        assert_eq!(fault.take(), None);
        assert!(!fault.snapshot().active);
    }

    #[test]
    fn test_fault_code_conversions() {
        assert_eq!(FaultCode::from(TransportError::Bus), FaultCode::Bus);
        assert_eq!(FaultCode::from(TransportError::Latch), FaultCode::Latch);
        assert_eq!(FaultCode::from_u8(2), FaultCode::Latch);
        assert_eq!(FaultCode::from_u8(9), FaultCode::None);
        assert_eq!(FaultCode::Latch.to_string(), "latch");
    }
}
