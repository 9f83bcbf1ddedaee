//! Generator state shared between the foreground and the tick context.
//!
//! The state sits in a [`critical_section::Mutex`]. Writers publish a whole
//! [`GeneratorState`] with one store; the tick reads, advances and writes
//! back inside a single critical section. A tick therefore only ever sees a
//! state some configuration call produced, or its own successor of one.

use core::cell::Cell;

use critical_section::Mutex;

use super::state::GeneratorState;
use crate::sample::DacValue;

/// Interrupt-safe home of the one [`GeneratorState`].
///
/// # Usage
///
/// ```ignore
/// static GENERATOR: SharedGenerator = SharedGenerator::new();
///
/// // Foreground:
/// GENERATOR.publish(GeneratorState::new(Waveform::Sine, 4095, 250));
///
/// // Tick context:
/// let sample = GENERATOR.advance();
/// ```
pub struct SharedGenerator {
    state: Mutex<Cell<GeneratorState>>,
}

impl SharedGenerator {
    /// Create a generator in the `Off` state.
    pub const fn new() -> Self {
        Self::with_state(GeneratorState::OFF)
    }

    /// Create a generator holding `state`.
    pub const fn with_state(state: GeneratorState) -> Self {
        Self {
            state: Mutex::new(Cell::new(state)),
        }
    }

    /// Replace the whole state atomically with respect to the tick.
    #[inline]
    pub fn publish(&self, state: GeneratorState) {
        critical_section::with(|cs| self.state.borrow(cs).set(state));
    }

    /// Copy of the current state.
    #[inline]
    pub fn snapshot(&self) -> GeneratorState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    /// Read-modify-write under one critical section.
    #[inline]
    pub fn update<R>(&self, f: impl FnOnce(&mut GeneratorState) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            let result = f(&mut state);
            cell.set(state);
            result
        })
    }

    /// Advance by one tick and return the sample to emit.
    #[inline]
    pub fn advance(&self) -> DacValue {
        self.update(GeneratorState::advance)
    }
}

impl Default for SharedGenerator {
    fn default() -> Self {
        Self::new()
    }
}
