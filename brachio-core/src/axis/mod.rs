//! Per-axis step generation
//!
//! - [`set`]: axis identifiers and the [`AxisSet`] container
//! - [`polarity`]: step direction to DIR level mapping
//! - [`controller`]: pulse pacing, limit interlock, unit conversion

pub mod controller;
pub mod polarity;
pub mod set;

pub use controller::{AxisController, StepOutcome};
pub use polarity::{dir_pin_level, drives_toward_home, StepDirection};
pub use set::{Axis, AxisSet};
