//! Machine configuration root
//!
//! Mirrors the layout of `machine.toml`:
//!
//! ```toml
//! [kinematics]
//! elbow_down = false
//!
//! [calibration]
//! offset_z = 12.5
//!
//! [motion]
//! default_feed_rate = 1500.0
//!
//! [axes.shoulder]
//! reduction_ratio = 4.5
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{AxisConfig, Calibration};
use crate::axis::AxisSet;

/// Default modal feed rate in mm/min
pub const DEFAULT_FEED_RATE: f32 = 1000.0;

/// `[kinematics]` section
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct KinematicsConfig {
    /// Boot with the elbow-down IK branch selected
    pub elbow_down: bool,
}

/// `[motion]` section
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MotionConfig {
    /// Feed rate used until the first `F` word (mm/min)
    pub default_feed_rate: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            default_feed_rate: DEFAULT_FEED_RATE,
        }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MachineConfig {
    pub kinematics: KinematicsConfig,
    pub calibration: Calibration,
    pub motion: MotionConfig,
    pub axes: AxisSet<AxisConfig>,
}

impl MachineConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
