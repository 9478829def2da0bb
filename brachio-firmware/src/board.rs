//! SKR Pico wiring
//!
//! | Function | STEP | DIR | EN | Limit |
//! |----------|------|-----|----|-------|
//! | base     | 11   | 10  | 12 | 4     |
//! | shoulder | 6    | 5   | 7  | 3     |
//! | elbow    | 19   | 28  | 2  | 25    |
//! | slider   | 14   | 13  | 15 | 16    |
//!
//! Tools: fan GPIO17, suction GPIO23, gripper GPIO18. Host UART0 on
//! GPIO0 (TX) / GPIO1 (RX).

use embassy_rp::gpio::Pin;
use embassy_rp::Peri;

use brachio_core::axis::{Axis, AxisController};
use brachio_core::config::AxisConfig;
use brachio_hal_rp2040::{RpInput, RpOutput};

/// Axis controller driving RP2040 GPIOs
pub type BoardAxis = AxisController<RpOutput<'static>, RpInput<'static>>;

/// Wire one step/dir driver and its limit switch
///
/// The limit input gets a pull toward its released level.
pub fn axis(
    axis: Axis,
    config: AxisConfig,
    step: Peri<'static, impl Pin>,
    dir: Peri<'static, impl Pin>,
    enable: Peri<'static, impl Pin>,
    limit: Peri<'static, impl Pin>,
) -> BoardAxis {
    let limit = if config.limit_active_low {
        RpInput::pull_up(limit)
    } else {
        RpInput::pull_down(limit)
    };

    AxisController::new(
        axis,
        config,
        RpOutput::new(step),
        RpOutput::new(dir),
        // Start with the driver off whatever its enable polarity
        RpOutput::with_level(enable, config.enable_inverted),
        limit,
    )
}
