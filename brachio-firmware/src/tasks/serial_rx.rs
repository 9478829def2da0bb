//! Host UART receive task
//!
//! Splits the byte stream into lines and parses each into a command.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use brachio_protocol::{parse_line, LineAssembler, ParseError};

use crate::channels::{Outgoing, COMMAND_CHANNEL, REPLY_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Serial RX task - turns host lines into queued commands
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut lines: LineAssembler = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match lines.feed(byte) {
                        Ok(Some(line)) => handle_line(&line).await,
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Dropping line: {:?}", e);
                            REPLY_CHANNEL.send(Outgoing::LineTooLong).await;
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

async fn handle_line(line: &str) {
    match parse_line(line) {
        Ok(cmd) => {
            debug!("Command: {:?}", cmd);
            // Blocks while the control loop's queue is full, which stops
            // reading and lets the UART buffer apply backpressure
            COMMAND_CHANNEL.send(cmd).await;
        }
        // Comment-only lines need no reply
        Err(ParseError::Empty) => {}
        Err(e) => {
            warn!("Parse error: {:?}", e);
            REPLY_CHANNEL.send(Outgoing::ParseError(e)).await;
        }
    }
}
