//! Command dispatch and the per-cycle control loop

pub mod controller;
pub mod reply;

pub use controller::{ArmController, Positioning, Tools};
pub use reply::{Cycle, Rejection, Reply};
