//! Motion command protocol
//!
//! This crate defines the line-oriented text protocol spoken on the host
//! serial link, and the structured record the motion core consumes.
//!
//! # Protocol Overview
//!
//! One command per line, space separated:
//! ```text
//! ┌─────────────┬──────────────────────────────┬───────────┐
//! │ LETTER+CODE │ FIELDS                       │ ; COMMENT │
//! │ G1          │ X120 Y-40 Z80 E5 F1500       │ optional  │
//! └─────────────┴──────────────────────────────┴───────────┘
//! ```
//!
//! Lines are assembled from raw bytes by [`LineAssembler`], parsed into a
//! [`Command`] by [`parse_line`], and buffered in a [`CommandQueue`] until the
//! controller is ready for them.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod parser;
pub mod queue;

pub use command::{Command, CommandLetter, Field};
pub use line::{LineAssembler, LineError, MAX_LINE_LEN};
pub use parser::{parse_line, ParseError};
pub use queue::{CommandQueue, DEFAULT_QUEUE_CAPACITY};
