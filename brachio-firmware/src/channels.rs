//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use brachio_core::axis::Axis;
use brachio_core::machine::Reply;
use brachio_protocol::{Command, ParseError};

/// Channel capacity for parsed commands waiting for the control loop
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for lines waiting to go out on the serial link
const REPLY_CHANNEL_SIZE: usize = 8;

/// Message for the host
#[derive(Debug, Clone, Copy)]
pub enum Outgoing {
    /// Boot banner
    Ready,
    Reply(Reply),
    ParseError(ParseError),
    LineTooLong,
    /// A limit switch stopped this axis
    LimitHalt(Axis),
}

/// Parsed commands from the serial link
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Replies and notices for the serial link
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, Outgoing, REPLY_CHANNEL_SIZE> =
    Channel::new();
