//! Adapters from `embedded-hal` 1.0 peripherals
//!
//! Chip HALs (embassy, rp-hal, stm32 HALs) implement the `embedded-hal`
//! traits; wrapping their peripherals here lets them drive a panel link
//! without per-chip glue.

use crate::gpio::OutputPin;
use crate::spi::SpiBus;

/// `embedded-hal` SPI bus used as a [`SpiBus`]
pub struct EhSpi<B> {
    bus: B,
}

impl<B> EhSpi<B> {
    /// Wrap an `embedded-hal` SPI bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the wrapped bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: embedded_hal::spi::SpiBus<u8>> SpiBus for EhSpi<B> {
    type Error = B::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::write(&mut self.bus, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::flush(&mut self.bus)
    }
}

/// `embedded-hal` output pin used as an [`OutputPin`]
///
/// On-chip GPIO writes are infallible, but pins behind an expander can
/// fail. Failures are logged and counted, and the last requested level is
/// tracked locally either way.
pub struct EhPin<P> {
    pin: P,
    high: bool,
    write_errors: u32,
}

impl<P: embedded_hal::digital::OutputPin> EhPin<P> {
    /// Wrap an `embedded-hal` output pin, driving it low
    pub fn new(pin: P) -> Self {
        let mut pin = Self {
            pin,
            high: true,
            write_errors: 0,
        };
        OutputPin::set_low(&mut pin);
        pin
    }

    /// Number of pin writes the underlying driver rejected
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    /// Release the wrapped pin
    pub fn release(self) -> P {
        self.pin
    }

    fn record(&mut self, result: Result<(), P::Error>) {
        if let Err(err) = result {
            #[cfg(feature = "defmt")]
            defmt::warn!("GPIO write failed: {}", defmt::Debug2Format(&err));
            #[cfg(not(feature = "defmt"))]
            let _ = err;
            self.write_errors = self.write_errors.saturating_add(1);
        }
    }
}

impl<P: embedded_hal::digital::OutputPin> OutputPin for EhPin<P> {
    fn set_high(&mut self) {
        let result = self.pin.set_high();
        self.record(result);
        self.high = true;
    }

    fn set_low(&mut self) {
        let result = self.pin.set_low();
        self.record(result);
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
