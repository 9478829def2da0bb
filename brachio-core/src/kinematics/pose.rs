//! Cartesian and joint-space pose values

use core::ops::{Add, Sub};

use crate::math;

/// Cartesian point in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another point
    pub fn distance(&self, other: &Position) -> f32 {
        let d = *other - *self;
        math::sqrt(d.x * d.x + d.y * d.y + d.z * d.z)
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Joint angles in radians
///
/// No wrapping is applied; values outside one turn are passed through.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointPose {
    pub base: f32,
    pub shoulder: f32,
    pub elbow: f32,
}

impl JointPose {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(base: f32, shoulder: f32, elbow: f32) -> Self {
        Self {
            base,
            shoulder,
            elbow,
        }
    }
}

impl Add for JointPose {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.base + rhs.base,
            self.shoulder + rhs.shoulder,
            self.elbow + rhs.elbow,
        )
    }
}

impl Sub for JointPose {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.base - rhs.base,
            self.shoulder - rhs.shoulder,
            self.elbow - rhs.elbow,
        )
    }
}
