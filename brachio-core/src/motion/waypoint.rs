//! Four-component interpolation pose

use crate::kinematics::Position;
use crate::math;

/// Cartesian tool position plus slider extension, all in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Waypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Slider extension, not part of the angular solve
    pub e: f32,
}

impl Waypoint {
    pub const fn new(x: f32, y: f32, z: f32, e: f32) -> Self {
        Self { x, y, z, e }
    }

    pub const fn from_position(position: Position, e: f32) -> Self {
        Self::new(position.x, position.y, position.z, e)
    }

    /// The Cartesian part
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    /// 4-D Euclidean distance, slider included
    pub fn distance(&self, other: &Waypoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        let de = other.e - self.e;
        math::sqrt(dx * dx + dy * dy + dz * dz + de * de)
    }

    /// Point at `ratio` along the line to `goal`
    pub fn lerp(&self, goal: &Waypoint, ratio: f32) -> Waypoint {
        Waypoint::new(
            self.x + (goal.x - self.x) * ratio,
            self.y + (goal.y - self.y) * ratio,
            self.z + (goal.z - self.z) * ratio,
            self.e + (goal.e - self.e) * ratio,
        )
    }
}
