//! Step direction to DIR pin level mapping
//!
//! Logical step counts decrease toward the homing limit. `dir_high_to_home`
//! says which DIR level moves the carriage that way, and `reverse` flips
//! the result for motors wired backwards.

/// Sign of a step relative to the step counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirection {
    /// Step count increases
    Positive,
    /// Step count decreases
    Negative,
}

impl StepDirection {
    /// Direction needed to move from `current` toward `target`
    ///
    /// Returns `None` when already there.
    pub fn toward(current: i32, target: i32) -> Option<Self> {
        match target.cmp(&current) {
            core::cmp::Ordering::Greater => Some(StepDirection::Positive),
            core::cmp::Ordering::Less => Some(StepDirection::Negative),
            core::cmp::Ordering::Equal => None,
        }
    }

    /// Step counter change for one pulse
    pub fn delta(self) -> i32 {
        match self {
            StepDirection::Positive => 1,
            StepDirection::Negative => -1,
        }
    }
}

/// DIR pin level for a step in `direction`
pub fn dir_pin_level(direction: StepDirection, dir_high_to_home: bool, reverse: bool) -> bool {
    let level = match direction {
        StepDirection::Positive => !dir_high_to_home,
        StepDirection::Negative => dir_high_to_home,
    };
    level != reverse
}

/// True if driving DIR at `level` moves toward the homing limit
pub fn drives_toward_home(level: bool, dir_high_to_home: bool) -> bool {
    level == dir_high_to_home
}
