//! Host-side pin and clock doubles

use core::cell::Cell;
use std::rc::Rc;

use brachio_hal::{DelayUs, InputPin, Monotonic, OutputPin};

/// Output pin that records its level and rising edges
#[derive(Debug, Clone, Default)]
pub struct MockOutput {
    level: Rc<Cell<bool>>,
    rising_edges: Rc<Cell<u32>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }

    pub fn rising_edges(&self) -> u32 {
        self.rising_edges.get()
    }
}

impl OutputPin for MockOutput {
    fn set_high(&mut self) {
        if !self.level.get() {
            self.rising_edges.set(self.rising_edges.get() + 1);
        }
        self.level.set(true);
    }

    fn set_low(&mut self) {
        self.level.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.level.get()
    }
}

/// Input pin driven by the test
#[derive(Debug, Clone)]
pub struct MockInput {
    level: Rc<Cell<bool>>,
}

impl MockInput {
    pub fn new(high: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(high)),
        }
    }

    pub fn set(&self, high: bool) {
        self.level.set(high);
    }
}

impl InputPin for MockInput {
    fn is_high(&self) -> bool {
        self.level.get()
    }
}

/// Clock shared with [`MockDelay`], so blocking delays advance time
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now_us: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            now_us: self.now_us.clone(),
        }
    }
}

impl Monotonic for MockClock {
    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}

#[derive(Debug, Clone)]
pub struct MockDelay {
    now_us: Rc<Cell<u64>>,
}

impl DelayUs for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.now_us.set(self.now_us.get() + us as u64);
    }
}

/// Handles onto one axis's pins
#[derive(Debug, Clone)]
pub struct AxisPins {
    pub step: MockOutput,
    pub dir: MockOutput,
    pub enable: MockOutput,
    /// Idle high: the default active-low switch is released
    pub limit: MockInput,
}

impl AxisPins {
    pub fn new() -> Self {
        Self {
            step: MockOutput::new(),
            dir: MockOutput::new(),
            enable: MockOutput::new(),
            limit: MockInput::new(true),
        }
    }
}
