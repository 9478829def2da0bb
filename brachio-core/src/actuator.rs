//! Binary on/off actuators
//!
//! Fan, suction pump and gripper are plain GPIO switches (directly or via a
//! MOSFET/relay board). No PWM.

use brachio_hal::OutputPin;

/// GPIO actuator output
///
/// Starts off. The pin may be active-high (default) or active-low.
pub struct Actuator<P> {
    pin: P,
    /// If true, actuator ON = pin LOW
    inverted: bool,
    on: bool,
}

impl<P: OutputPin> Actuator<P> {
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut actuator = Self {
            pin,
            inverted,
            on: false,
        };
        actuator.set_on(false);
        actuator
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
        self.pin.set_level(on != self.inverted);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockOutput;

    #[test]
    fn test_active_high() {
        let pin = MockOutput::new();
        let mut fan = Actuator::new_active_high(pin.clone());
        assert!(!fan.is_on());
        assert!(!pin.level());

        fan.set_on(true);
        assert!(fan.is_on());
        assert!(pin.level());
    }

    #[test]
    fn test_active_low_starts_high() {
        let pin = MockOutput::new();
        let mut pump = Actuator::new_active_low(pin.clone());
        assert!(!pump.is_on());
        assert!(pin.level());

        pump.set_on(true);
        assert!(!pin.level());
        pump.set_on(false);
        assert!(pin.level());
    }
}
