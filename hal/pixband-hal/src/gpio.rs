//! GPIO pin abstractions
//!
//! Output pins used for the panel's chip-select and A0 lines.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Output pin with a configurable active level
///
/// Chip-select lines are active-low on most panels but some boards route
/// them through an inverter, so the level that means "selected" is
/// configuration rather than a constant.
pub struct ActivePin<P> {
    pin: P,
    active_high: bool,
}

impl<P: OutputPin> ActivePin<P> {
    /// Wrap a pin, leaving it in the inactive state
    pub fn new(mut pin: P, active_high: bool) -> Self {
        pin.set_state(!active_high);
        Self { pin, active_high }
    }

    /// Drive the pin to its active level
    pub fn activate(&mut self) {
        self.pin.set_state(self.active_high);
    }

    /// Drive the pin to its inactive level
    pub fn deactivate(&mut self) {
        self.pin.set_state(!self.active_high);
    }

    /// Check whether the pin is at its active level
    pub fn is_active(&self) -> bool {
        self.pin.is_set_high() == self.active_high
    }

    /// Change the active level, leaving the pin inactive
    pub fn set_active_high(&mut self, active_high: bool) {
        self.active_high = active_high;
        self.deactivate();
    }

    /// Get access to the underlying pin
    pub fn inner(&self) -> &P {
        &self.pin
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_low_pin() {
        let mut cs = ActivePin::new(MockPin { high: false }, false);
        // Starts deselected
        assert!(cs.inner().is_set_high());
        assert!(!cs.is_active());

        cs.activate();
        assert!(cs.inner().is_set_low());
        assert!(cs.is_active());

        cs.deactivate();
        assert!(cs.inner().is_set_high());
    }

    #[test]
    fn test_active_high_pin() {
        let mut cs = ActivePin::new(MockPin { high: true }, true);
        assert!(cs.inner().is_set_low());

        cs.activate();
        assert!(cs.inner().is_set_high());
        assert!(cs.is_active());

        cs.set_active_high(false);
        assert!(!cs.is_active());
        assert!(cs.inner().is_set_high());
    }
}
