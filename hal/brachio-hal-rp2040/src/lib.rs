//! RP2040 implementations of the `brachio-hal` traits
//!
//! - [`gpio`]: step/dir/enable outputs and limit inputs over embassy-rp GPIO
//! - [`time`]: the embassy time driver as the motion clock, plus a busy-wait
//!   delay for step pulse widths
//!
//! UART setup stays in the firmware crate, which owns the interrupt
//! bindings.

#![no_std]

pub mod gpio;
pub mod time;

pub use gpio::{RpInput, RpOutput};
pub use time::{BusyDelay, EmbassyClock};
