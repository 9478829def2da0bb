//! Command replies and per-cycle results

use core::fmt;

use brachio_protocol::CommandLetter;

use crate::axis::AxisSet;
use crate::motion::Waypoint;

/// Why a well-formed command was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejection {
    /// `F` was zero or negative
    InvalidFeedRate,
    /// A field value is outside what the command accepts
    InvalidArgument,
    /// The command queue has no free slot
    QueueFull,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::InvalidFeedRate => "invalid_feed_rate",
            Rejection::InvalidArgument => "invalid_argument",
            Rejection::QueueFull => "queue_full",
        }
    }
}

/// Result of executing one command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Accepted
    Ok,
    /// Position report (`M114`)
    Position(Waypoint),
    Rejected(Rejection),
    /// Command is not implemented
    Unsupported { letter: CommandLetter, code: u16 },
}

/// Wire form sent back to the host
///
/// ```text
/// ok
/// ok X:340.00 Y:0.00 Z:110.00 E:0.00
/// error:invalid_feed_rate
/// error:unsupported G5
/// ```
impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => f.write_str("ok"),
            Reply::Position(p) => write!(
                f,
                "ok X:{:.2} Y:{:.2} Z:{:.2} E:{:.2}",
                p.x, p.y, p.z, p.e
            ),
            Reply::Rejected(reason) => write!(f, "error:{}", reason.as_str()),
            Reply::Unsupported { letter, code } => {
                write!(f, "error:unsupported {}{}", letter.as_char(), code)
            }
        }
    }
}

/// Outcome of one control cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cycle {
    /// Reply to the command dispatched this cycle
    pub reply: Option<Reply>,
    /// Axes stopped by their limit switch this cycle
    pub halted: AxisSet<bool>,
}
