//! Configuration types
//!
//! Link geometry is a compile-time constant. Everything else comes from
//! `machine.toml`, parsed on the device by [`parse_machine_config`] and
//! checked at build time through the `serde` derives.

pub mod axis;
pub mod calibration;
pub mod geometry;
pub mod machine;
pub mod parse;

pub use axis::*;
pub use calibration::Calibration;
pub use geometry::ArmGeometry;
pub use machine::*;
pub use parse::{parse_machine_config, ConfigError, ConfigErrorKind};
