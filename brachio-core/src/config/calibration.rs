//! Kinematic calibration offsets
//!
//! Joint zero offsets map the motor "zero step" position onto the model's
//! zero angle. Cartesian offsets move the model origin onto the physical
//! mounting origin. IK subtracts both, FK adds both back.
//!
//! Offsets live in RAM only and reset to the configured values on boot.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::kinematics::{JointPose, Position};

/// Run-time calibration offsets
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Calibration {
    /// Base zero offset (rad)
    pub base_zero_rad: f32,
    /// Shoulder zero offset (rad)
    pub shoulder_zero_rad: f32,
    /// Elbow zero offset (rad)
    pub elbow_zero_rad: f32,
    /// Model origin X in world frame (mm)
    pub offset_x: f32,
    /// Model origin Y in world frame (mm)
    pub offset_y: f32,
    /// Model origin Z in world frame (mm)
    pub offset_z: f32,
}

impl Calibration {
    /// Joint zero offsets as a pose
    pub fn joint_zero(&self) -> JointPose {
        JointPose::new(self.base_zero_rad, self.shoulder_zero_rad, self.elbow_zero_rad)
    }

    /// Cartesian origin offset as a point
    pub fn cartesian_offset(&self) -> Position {
        Position::new(self.offset_x, self.offset_y, self.offset_z)
    }
}
