//! Host UART transmit task
//!
//! Formats replies and notices as text lines.

use core::fmt::Write as _;

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;
use heapless::String;

use crate::channels::{Outgoing, REPLY_CHANNEL};

/// Longest line the firmware sends
const TX_LINE_LEN: usize = 96;

/// Serial TX task - writes queued messages to the host
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let msg = REPLY_CHANNEL.receive().await;

        let mut line: String<TX_LINE_LEN> = String::new();
        if format_line(&mut line, &msg).is_err() {
            warn!("Reply truncated");
        }

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("UART write error: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(b"\n").await {
            warn!("UART write error: {:?}", e);
        }
    }
}

fn format_line(line: &mut String<TX_LINE_LEN>, msg: &Outgoing) -> core::fmt::Result {
    match msg {
        Outgoing::Ready => line.write_str("start"),
        Outgoing::Reply(reply) => write!(line, "{}", reply),
        Outgoing::ParseError(e) => write!(line, "error:{}", e.as_str()),
        Outgoing::LineTooLong => line.write_str("error:line_too_long"),
        Outgoing::LimitHalt(axis) => write!(line, "!! limit {}", axis.name()),
    }
}
