//! Board-agnostic motion core for the Brachio arm firmware
//!
//! Everything here is independent of the MCU and is tested on the host:
//!
//! - Configuration types and the `machine.toml` reader
//! - Inverse and forward kinematics for the base/shoulder/elbow arm
//! - Per-axis step generation with the limit interlock
//! - Constant-velocity Cartesian interpolation
//! - On/off tool actuators
//! - The orchestration loop that ties them to the command queue
//!
//! Floating point maths goes through `libm` on every build, so host tests
//! exercise the same routines the target runs.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuator;
pub mod axis;
pub mod config;
pub mod kinematics;
pub mod machine;
mod math;
pub mod motion;

#[cfg(test)]
mod testing;
