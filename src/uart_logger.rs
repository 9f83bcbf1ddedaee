//! Log drain: formats queued entries and hands them to a byte sink.
//!
//! On ESP-IDF the sink is a TX-only UART. Draining happens in foreground
//! idle time, never in the tick context.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32 UART1 TX ──────▶ USB-UART RX
//!                         └─▶ PC Serial Monitor
//! ```

use core::fmt::Write;

use crate::logging::{BufWriter, LogEntry, LogStream, MAX_MSG_LEN};

/// Room for the prefix plus a full message.
pub const LINE_BUF_LEN: usize = MAX_MSG_LEN + 32;

/// UART configuration for logging.
pub struct UartLoggerConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 17,
        }
    }
}

/// Format log entry to bytes.
///
/// Format: `[timestamp] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };
    let _ = write!(
        writer,
        "[{:10}] {}: {}\n",
        entry.timestamp,
        entry.level.as_str(),
        entry.text()
    );
    writer.pos
}

/// Drain every pending entry of `stream` into `sink`, one formatted line
/// per call. Appends a warning line if messages were dropped since the
/// last drain.
///
/// Returns the number of lines handed to `sink`.
pub fn drain_with<const N: usize>(stream: &LogStream<N>, mut sink: impl FnMut(&[u8])) -> u32 {
    let mut line = [0u8; LINE_BUF_LEN];
    let mut lines = 0;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut line);
        sink(&line[..len]);
        lines += 1;
    }

    let dropped = stream.take_dropped();
    if dropped > 0 {
        let mut writer = BufWriter { buf: &mut line, pos: 0 };
        let _ = write!(writer, "[WARN] Dropped: {}\n", dropped);
        let len = writer.pos;
        sink(&line[..len]);
        lines += 1;
    }

    lines
}

/// Initialize UART1 TX-only for logging output.
#[cfg(target_os = "espidf")]
pub fn init_uart_logger<'d>(
    uart: impl esp_idf_svc::hal::peripheral::Peripheral<P = esp_idf_svc::hal::uart::UART1> + 'd,
    tx_pin: impl esp_idf_svc::hal::peripheral::Peripheral<P = impl esp_idf_svc::hal::gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<esp_idf_svc::hal::uart::UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    use esp_idf_svc::hal::{gpio, uart};

    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    uart::UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// Drain the given streams to UART, in order.
#[cfg(target_os = "espidf")]
pub fn drain_to_uart(
    uart: &mut esp_idf_svc::hal::uart::UartTxDriver<'_>,
    streams: &[&LogStream],
) -> u32 {
    streams
        .iter()
        .map(|stream| {
            drain_with(*stream, |bytes| {
                let _ = uart.write(bytes);
            })
        })
        .sum()
}
