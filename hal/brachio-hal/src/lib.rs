//! Brachio Hardware Abstraction Layer
//!
//! This crate defines the minimal hardware surface the motion core needs.
//! Chip-specific HALs implement these traits so the same control logic runs
//! on the board and under host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (brachio-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  brachio-core (axis, kinematics, ...)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  brachio-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ brachio-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`time::Monotonic`] - Free-running microsecond clock
//! - [`time::DelayUs`] - Blocking microsecond delay

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use time::{DelayUs, Monotonic};
