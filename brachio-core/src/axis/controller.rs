//! Step/dir axis controller
//!
//! Each axis owns its step count and paces pulses at a fixed interval. Target
//! commands only record the goal; pins change on the next [`update`] call.
//! One update emits at most one pulse.
//!
//! A tripped limit switch blocks any step toward home and cancels the move.
//! Steps away from home are still allowed, so an axis parked on its switch
//! can always back off.
//!
//! [`update`]: AxisController::update

use brachio_hal::{DelayUs, InputPin, OutputPin};

use super::polarity::{dir_pin_level, drives_toward_home, StepDirection};
use super::Axis;
use crate::config::AxisConfig;

/// Result of one [`AxisController::update`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// No move in progress
    Idle,
    /// Moving, but the step interval has not elapsed
    Pending,
    /// One pulse emitted
    Stepped,
    /// Target reached, move finished
    Arrived,
    /// Limit switch tripped toward home, move cancelled
    LimitHalt,
}

/// Controller for one stepper axis
pub struct AxisController<P: OutputPin, I: InputPin> {
    axis: Axis,
    config: AxisConfig,
    step_pin: P,
    dir_pin: P,
    enable_pin: P,
    limit_pin: I,
    current: i32,
    target: i32,
    moving: bool,
    enabled: bool,
    last_step_us: u64,
}

impl<P: OutputPin, I: InputPin> AxisController<P, I> {
    /// Create a controller at step 0 with the driver disabled
    pub fn new(
        axis: Axis,
        config: AxisConfig,
        mut step_pin: P,
        dir_pin: P,
        enable_pin: P,
        limit_pin: I,
    ) -> Self {
        step_pin.set_low();
        let mut controller = Self {
            axis,
            config,
            step_pin,
            dir_pin,
            enable_pin,
            limit_pin,
            current: 0,
            target: 0,
            moving: false,
            enabled: false,
            last_step_us: 0,
        };
        controller.enable(false);
        controller
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Drive the axis one step at a time toward its target
    pub fn update(&mut self, now_us: u64, delay: &mut impl DelayUs) -> StepOutcome {
        if !self.moving {
            return StepOutcome::Idle;
        }

        let Some(direction) = StepDirection::toward(self.current, self.target) else {
            self.moving = false;
            return StepOutcome::Arrived;
        };

        if now_us.saturating_sub(self.last_step_us) < self.config.step_interval_us as u64 {
            return StepOutcome::Pending;
        }

        let level = dir_pin_level(
            direction,
            self.config.dir_high_to_home,
            self.config.reverse_direction,
        );

        if self.is_limit_active() && drives_toward_home(level, self.config.dir_high_to_home) {
            self.moving = false;
            self.target = self.current;
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "{} limit hit moving toward home, halted at step {}",
                self.axis.name(),
                self.current
            );
            return StepOutcome::LimitHalt;
        }

        let half = self.config.step_interval_us / 2;
        self.dir_pin.set_level(level);
        self.step_pin.set_high();
        delay.delay_us(half);
        self.step_pin.set_low();
        delay.delay_us(half);

        self.current += direction.delta();
        self.last_step_us = now_us;
        StepOutcome::Stepped
    }

    /// Move `steps` relative to the current position
    pub fn step_relative(&mut self, steps: i32) {
        self.target = self.current.saturating_add(steps);
        self.moving = true;
    }

    /// Move to an absolute step count
    pub fn step_to(&mut self, steps: i32) {
        self.target = steps;
        self.moving = true;
    }

    /// Move to an absolute joint angle
    ///
    /// The step target is truncated toward zero.
    pub fn step_to_rad(&mut self, rad: f32) {
        self.step_to((rad * self.rad_to_step_factor()) as i32);
    }

    /// Move to an absolute linear position
    pub fn step_to_mm(&mut self, mm: f32) {
        self.step_to((mm * self.config.mm_to_step_factor()) as i32);
    }

    /// Redefine the current position without moving
    pub fn set_position(&mut self, steps: i32) {
        self.current = steps;
        self.target = steps;
        self.moving = false;
    }

    pub fn set_reduction_ratio(&mut self, ratio: f32, steps_per_revolution: u32) {
        self.config.reduction_ratio = ratio;
        self.config.steps_per_revolution = steps_per_revolution;
    }

    pub fn set_step_interval_us(&mut self, interval_us: u32) {
        self.config.step_interval_us = interval_us;
    }

    /// Switch the driver on or off
    pub fn enable(&mut self, on: bool) {
        self.enable_pin.set_level(on != self.config.enable_inverted);
        self.enabled = on;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_on_target(&self) -> bool {
        self.current == self.target
    }

    pub fn position(&self) -> i32 {
        self.current
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    /// Current position as a joint angle
    pub fn position_rad(&self) -> f32 {
        self.current as f32 * self.step_to_rad_factor()
    }

    /// Current position as linear travel
    pub fn position_mm(&self) -> f32 {
        self.current as f32 * self.config.step_to_mm_factor()
    }

    /// Limit switch is tripped
    pub fn is_limit_active(&self) -> bool {
        if self.config.limit_active_low {
            self.limit_pin.is_low()
        } else {
            self.limit_pin.is_high()
        }
    }

    pub fn rad_to_step_factor(&self) -> f32 {
        self.config.rad_to_step_factor()
    }

    pub fn step_to_rad_factor(&self) -> f32 {
        self.config.step_to_rad_factor()
    }
}
