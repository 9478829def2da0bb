//! Trajectory interpolation
//!
//! Time-paced straight-line segments between Cartesian waypoints.

pub mod interpolator;
pub mod waypoint;

pub use interpolator::{Interpolator, MIN_SEGMENT_LENGTH};
pub use waypoint::Waypoint;
