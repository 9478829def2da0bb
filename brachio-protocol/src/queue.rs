//! Fixed-capacity command ring
//!
//! Commands are stored in a fixed array indexed by head/tail counters modulo
//! the capacity. A push onto a full ring fails and hands the command back;
//! nothing already queued is ever overwritten.

use crate::command::Command;

/// Default number of queued commands
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// FIFO ring of [`Command`] records
#[derive(Debug, Clone)]
pub struct CommandQueue<const N: usize = DEFAULT_QUEUE_CAPACITY> {
    slots: [Option<Command>; N],
    head: usize,
    tail: usize,
    count: usize,
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CommandQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Append a command
    ///
    /// Returns the command back if the queue is full.
    pub fn push(&mut self, cmd: Command) -> Result<(), Command> {
        if self.is_full() {
            return Err(cmd);
        }
        self.slots[self.tail] = Some(cmd);
        self.tail = (self.tail + 1) % N;
        self.count += 1;
        Ok(())
    }

    /// Remove the oldest command
    pub fn pop(&mut self) -> Option<Command> {
        if self.is_empty() {
            return None;
        }
        let cmd = self.slots[self.head].take();
        self.head = (self.head + 1) % N;
        self.count -= 1;
        cmd
    }

    /// Oldest command without removing it
    pub fn peek(&self) -> Option<&Command> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Drop all queued commands
    pub fn clear(&mut self) {
        self.slots = [None; N];
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}
