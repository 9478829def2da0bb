//! Per-axis drive configuration
//!
//! Describes how a logical step count maps onto one step/dir driver:
//! pulse pacing, pin polarities and the gear/microstep scale.

use core::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default step interval in microseconds
pub const DEFAULT_STEP_INTERVAL_US: u32 = 100;

/// Default raw steps per motor revolution (1.8° motor at 1/16 microstepping)
pub const DEFAULT_STEPS_PER_REVOLUTION: u32 = 200 * 16;

/// Drive configuration for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AxisConfig {
    /// DIR pin level that drives the axis toward its homing limit
    pub dir_high_to_home: bool,
    /// Motor wiring is inverted relative to the logical step direction
    pub reverse_direction: bool,
    /// Gear reduction between motor and joint (negative flips the sense)
    pub reduction_ratio: f32,
    /// Raw steps per motor revolution, including microstepping
    pub steps_per_revolution: u32,
    /// Minimum time between step pulses in microseconds
    pub step_interval_us: u32,
    /// Limit switch reads low when tripped
    pub limit_active_low: bool,
    /// Driver is enabled when the enable pin is low
    pub enable_inverted: bool,
    /// Linear travel per output revolution in mm (slider only)
    pub travel_per_revolution: f32,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            dir_high_to_home: true,
            reverse_direction: false,
            reduction_ratio: 1.0,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            step_interval_us: DEFAULT_STEP_INTERVAL_US,
            limit_active_low: true,
            enable_inverted: true,
            travel_per_revolution: 8.0, // T8 lead screw
        }
    }
}

impl AxisConfig {
    /// Steps per output revolution, reduction included
    pub fn steps_per_output_revolution(&self) -> f32 {
        self.steps_per_revolution as f32 * self.reduction_ratio
    }

    /// Factor converting joint radians to steps
    pub fn rad_to_step_factor(&self) -> f32 {
        self.steps_per_output_revolution() / TAU
    }

    /// Factor converting steps to joint radians
    pub fn step_to_rad_factor(&self) -> f32 {
        TAU / self.steps_per_output_revolution()
    }

    /// Factor converting millimetres of linear travel to steps
    pub fn mm_to_step_factor(&self) -> f32 {
        self.steps_per_output_revolution() / self.travel_per_revolution
    }

    /// Factor converting steps to millimetres of linear travel
    pub fn step_to_mm_factor(&self) -> f32 {
        self.travel_per_revolution / self.steps_per_output_revolution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    #[test]
    fn test_default_factors() {
        let config = AxisConfig::default();
        // 3200 steps per revolution, no reduction
        assert!((config.rad_to_step_factor() * TAU - 3200.0).abs() < 1e-2);
        assert!((config.rad_to_step_factor() * config.step_to_rad_factor() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reduction_scales_factor() {
        let config = AxisConfig {
            reduction_ratio: 4.5,
            ..Default::default()
        };
        // Half a joint turn = 1600 motor steps * 4.5
        assert!((config.rad_to_step_factor() * PI - 7200.0).abs() < 1e-1);
    }

    #[test]
    fn test_linear_factors() {
        let config = AxisConfig {
            travel_per_revolution: 8.0,
            ..Default::default()
        };
        assert!((config.mm_to_step_factor() - 400.0).abs() < 1e-3);
        assert!((config.step_to_mm_factor() * 400.0 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_reduction_flips_sign() {
        let config = AxisConfig {
            reduction_ratio: -2.0,
            ..Default::default()
        };
        assert!(config.rad_to_step_factor() < 0.0);
    }
}
