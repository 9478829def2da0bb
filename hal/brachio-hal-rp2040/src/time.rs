//! Clock and delay backed by embassy-time

use brachio_hal::{DelayUs, Monotonic};
use embassy_time::{block_for, Duration, Instant};

/// Monotonic clock reading the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }

    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Busy-wait delay
///
/// Blocks the executor for the whole duration. Only suitable for the
/// tens-of-microseconds step pulse halves.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusyDelay;

impl DelayUs for BusyDelay {
    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}
