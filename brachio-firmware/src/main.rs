//! Brachio - 3-DOF Arm Firmware
//!
//! Main firmware binary for RP2040-based arm controllers. Reads G/M command
//! lines from UART0, and drives the base, shoulder, elbow and slider steppers
//! and the tool outputs.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use brachio_core::actuator::Actuator;
use brachio_core::axis::{Axis, AxisSet};
use brachio_core::config::{parse_machine_config, ArmGeometry, MachineConfig};
use brachio_core::machine::{ArmController, Reply, Tools};
use brachio_hal_rp2040::{BusyDelay, EmbassyClock, RpInput, RpOutput};

use crate::channels::{Outgoing, COMMAND_CHANNEL, REPLY_CHANNEL};

/// Embedded configuration (compiled into firmware)
/// Edit machine.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../machine.toml");

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

type Arm = ArmController<RpOutput<'static>, RpInput<'static>, EmbassyClock, BusyDelay>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Brachio firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Host UART, 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for host communication");

    let axes = AxisSet {
        base: board::axis(
            Axis::Base,
            config.axes.base,
            p.PIN_11,
            p.PIN_10,
            p.PIN_12,
            p.PIN_4,
        ),
        shoulder: board::axis(
            Axis::Shoulder,
            config.axes.shoulder,
            p.PIN_6,
            p.PIN_5,
            p.PIN_7,
            p.PIN_3,
        ),
        elbow: board::axis(
            Axis::Elbow,
            config.axes.elbow,
            p.PIN_19,
            p.PIN_28,
            p.PIN_2,
            p.PIN_25,
        ),
        slider: board::axis(
            Axis::Slider,
            config.axes.slider,
            p.PIN_14,
            p.PIN_13,
            p.PIN_15,
            p.PIN_16,
        ),
    };

    let tools = Tools {
        fan: Actuator::new_active_high(RpOutput::new(p.PIN_17)),
        suction: Actuator::new_active_high(RpOutput::new(p.PIN_23)),
        gripper: Actuator::new_active_high(RpOutput::new(p.PIN_18)),
    };

    info!("Axes and tools initialized");

    let arm: Arm = ArmController::new(
        ArmGeometry::DEFAULT,
        &config,
        axes,
        tools,
        EmbassyClock,
        BusyDelay,
    );

    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::serial_tx_task(tx)).unwrap();

    info!("All tasks spawned, firmware running");
    REPLY_CHANNEL.send(Outgoing::Ready).await;

    control_loop(arm).await
}

/// Parse the embedded configuration
///
/// Falls back to built-in defaults if machine.toml cannot be read, which
/// build.rs should already have caught.
fn load_config() -> MachineConfig {
    match parse_machine_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!(
                "Failed to parse embedded config at line {}: {:?}",
                e.line, e.kind
            );
            error!("Using default configuration");
            MachineConfig::default()
        }
    }
}

/// Feed commands to the arm and report results, forever
async fn control_loop(mut arm: Arm) -> ! {
    loop {
        if !arm.is_queue_full() {
            if let Ok(cmd) = COMMAND_CHANNEL.try_receive() {
                if let Err(reason) = arm.submit(cmd) {
                    notify(Outgoing::Reply(Reply::Rejected(reason)));
                }
            }
        }

        let cycle = arm.poll();

        if let Some(reply) = cycle.reply {
            trace!("Reply: {:?}", reply);
            notify(Outgoing::Reply(reply));
        }

        for axis in Axis::ALL {
            if *cycle.halted.get(axis) {
                warn!("Limit halt on {}", axis.name());
                notify(Outgoing::LimitHalt(axis));
            }
        }

        embassy_futures::yield_now().await;
    }
}

/// Queue a message for the host without stalling the control loop
///
/// The message is dropped if the TX task has fallen behind.
fn notify(msg: Outgoing) {
    if REPLY_CHANNEL.try_send(msg).is_err() {
        warn!("Reply channel full, dropping message");
    }
}
