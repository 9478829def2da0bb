//! Time source abstractions
//!
//! The axis controller paces pulses in microseconds and the interpolator
//! paces segments in milliseconds, both from the same monotonic clock.

/// Monotonically increasing clock
///
/// The value must never go backwards. A 64-bit microsecond counter does not
/// wrap in any realistic uptime.
pub trait Monotonic {
    /// Microseconds since an arbitrary fixed origin
    fn now_us(&self) -> u64;

    /// Milliseconds since the same origin
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}

/// Blocking delay
///
/// Used for step pulse widths. This is a busy wait, not a suspension point.
pub trait DelayUs {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}

impl<T: Monotonic> Monotonic for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

impl<T: DelayUs> DelayUs for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
