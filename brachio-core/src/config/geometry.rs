//! Arm link geometry
//!
//! Physical constants of the arm. These must be measured on the real
//! machine; every millimetre of error here shows up directly as position
//! error at the tool.

/// Link lengths and the rigid tool offset, in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArmGeometry {
    /// Height of the shoulder joint above the base plate (L1)
    pub base_height: f32,
    /// Shoulder to elbow (L2)
    pub upper_arm: f32,
    /// Elbow to wrist (L3)
    pub forearm: f32,
    /// Horizontal tool offset forward of the wrist
    pub tool_forward: f32,
    /// Vertical tool offset below the wrist
    pub tool_down: f32,
}

impl ArmGeometry {
    /// The reference arm: 160 mm column, 130/160 mm links, tool 50 mm
    /// forward and 50 mm down from the wrist
    pub const DEFAULT: Self = Self {
        base_height: 160.0,
        upper_arm: 130.0,
        forearm: 160.0,
        tool_forward: 50.0,
        tool_down: 50.0,
    };

    /// Closest shoulder-to-wrist distance the links can fold to
    pub fn min_reach(&self) -> f32 {
        let diff = self.upper_arm - self.forearm;
        if diff < 0.0 {
            -diff
        } else {
            diff
        }
    }

    /// Shoulder-to-wrist distance with the arm fully extended
    pub fn max_reach(&self) -> f32 {
        self.upper_arm + self.forearm
    }
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_band() {
        let g = ArmGeometry::DEFAULT;
        assert_eq!(g.min_reach(), 30.0);
        assert_eq!(g.max_reach(), 290.0);
    }
}
