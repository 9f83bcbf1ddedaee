//! Periodic tick source.
//!
//! The timer counts at a fixed clock and fires the tick every `ticks`
//! counts. The handler itself is registered by the firmware entry point;
//! the generator only ever changes the period.

/// Periodic timer that paces the tick handler.
pub trait SampleTimer {
    type Error: core::fmt::Debug;

    /// Counter clock in Hz.
    fn clock_hz(&self) -> u32;

    /// Fire every `ticks` counter units from now on.
    ///
    /// Must reset the counter together with the new period, so no partial
    /// period fires. `ticks` is always >= 1.
    fn set_period(&mut self, ticks: u32) -> Result<(), Self::Error>;
}

impl<T: SampleTimer + ?Sized> SampleTimer for &mut T {
    type Error = T::Error;

    fn clock_hz(&self) -> u32 {
        (**self).clock_hz()
    }

    fn set_period(&mut self, ticks: u32) -> Result<(), Self::Error> {
        (**self).set_period(ticks)
    }
}

#[cfg(target_os = "espidf")]
pub use esp::EspSampleTimer;

#[cfg(target_os = "espidf")]
mod esp {
    use super::SampleTimer;
    use esp_idf_svc::hal::timer::TimerDriver;
    use esp_idf_svc::sys::EspError;

    /// General-purpose timer group timer in auto-reload alarm mode.
    pub struct EspSampleTimer<'d> {
        driver: TimerDriver<'d>,
        clock_hz: u32,
    }

    impl<'d> EspSampleTimer<'d> {
        /// Wrap a driver created with `auto_reload(true)`.
        pub fn new(mut driver: TimerDriver<'d>) -> Result<Self, EspError> {
            let clock_hz = driver.tick_hz() as u32;
            driver.enable_interrupt()?;
            driver.enable_alarm(true)?;
            Ok(Self { driver, clock_hz })
        }

        /// Access the driver, e.g. to subscribe the ISR.
        pub fn driver_mut(&mut self) -> &mut TimerDriver<'d> {
            &mut self.driver
        }
    }

    impl SampleTimer for EspSampleTimer<'_> {
        type Error = EspError;

        fn clock_hz(&self) -> u32 {
            self.clock_hz
        }

        fn set_period(&mut self, ticks: u32) -> Result<(), EspError> {
            self.driver.enable(false)?;
            self.driver.set_counter(0)?;
            self.driver.set_alarm(ticks as u64)?;
            self.driver.enable(true)
        }
    }
}
