//! mcp4922-wavegen - firmware entry point (ESP-IDF)
//!
//! 1. SPI2 + LDAC pin drive the MCP4922
//! 2. Timer group 0 / timer 0 fires the tick ISR, which only notifies
//! 3. RT thread waits for the notification and runs one tick
//! 4. Main thread cycles through the waveforms, watches faults and drains
//!    both log streams to UART1

use core::num::NonZeroU32;
use std::sync::mpsc;

use esp_idf_svc::hal::delay::{FreeRtos, BLOCK};
use esp_idf_svc::hal::gpio::AnyIOPin;
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::spi::{config::Config as SpiConfig, SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_svc::hal::task::notification::Notification;
use esp_idf_svc::hal::timer::{config::Config as TimerConfig, TimerDriver};
use esp_idf_svc::hal::units::FromValueType;

use mcp4922_wavegen::hal::timer::EspSampleTimer;
use mcp4922_wavegen::logging::timestamp_us;
use mcp4922_wavegen::uart_logger::{drain_to_uart, init_uart_logger, UartLoggerConfig};
use mcp4922_wavegen::{
    rt_error, rt_info, rt_warn, FaultState, Mcp4922, SharedGenerator, SynthConfig, TickHandler,
    TickStats, Waveform, WaveController, FG_LOG_STREAM, TICK_LOG_STREAM, VERSION,
};

static GENERATOR: SharedGenerator = SharedGenerator::new();
static FAULT: FaultState = FaultState::new();
static STATS: TickStats = TickStats::new();

/// FreeRTOS task notifications top out around 20 kHz of ticks.
const MAX_SAMPLE_RATE_HZ: u32 = 20_000;

/// 80 MHz APB / 2 = 40 MHz counter clock.
const TIMER_DIVIDER: u32 = 2;

/// (waveform, frequency Hz, amplitude), 5 s each.
const DEMO: [(Waveform, f32, u16); 4] = [
    (Waveform::Sine, 50.0, 4095),
    (Waveform::Triangle, 40.0, 3000),
    (Waveform::Sawtooth, 60.0, 2048),
    (Waveform::Off, 0.0, 0),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    esp_idf_svc::sys::link_patches();

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;
    let config = SynthConfig::default().with_max_sample_rate(MAX_SAMPLE_RATE_HZ);

    let mut uart = init_uart_logger(peripherals.uart1, pins.gpio17, &UartLoggerConfig::default())?;
    rt_info!(FG_LOG_STREAM, timestamp_us(), "{}", VERSION);

    // MCP4922: SCK=12, SDI=11, CS=10, LDAC=9
    let spi = SpiDriver::new(
        peripherals.spi2,
        pins.gpio12,
        pins.gpio11,
        Option::<AnyIOPin>::None,
        &SpiDriverConfig::new(),
    )?;
    let spi = SpiDeviceDriver::new(spi, Some(pins.gpio10), &SpiConfig::new().baudrate(20.MHz().into()))?;
    let mut ldac = PinDriver::output(pins.gpio9)?;
    ldac.set_high()?;
    let dac = Mcp4922::new(spi, ldac, config.dac_mode);

    let timer = TimerDriver::new(
        peripherals.timer00,
        &TimerConfig::new().auto_reload(true).divider(TIMER_DIVIDER),
    )?;
    let mut timer = EspSampleTimer::new(timer)?;

    // The notification belongs to the task that waits on it, so the RT
    // thread creates it and hands the notifier back.
    let (notifier_tx, notifier_rx) = mpsc::channel();
    let channel = config.channel;
    std::thread::Builder::new()
        .name("rt-tick".into())
        .stack_size(4096)
        .spawn(move || {
            let notification = Notification::new();
            if notifier_tx.send(notification.notifier()).is_err() {
                return;
            }

            let mut handler =
                TickHandler::new(&GENERATOR, dac, channel, &FAULT, &STATS).with_log(&TICK_LOG_STREAM);
            loop {
                notification.wait(BLOCK);
                let _ = handler.on_tick();
            }
        })?;

    let notifier = notifier_rx.recv()?;
    // SAFETY: the callback runs in ISR context and only notifies the RT task.
    unsafe {
        timer.driver_mut().subscribe(move || {
            notifier.notify_and_yield(NonZeroU32::MIN);
        })?;
    }
    // Re-registering the callback can leave the interrupt masked
    timer.driver_mut().enable_interrupt()?;

    let mut controller = WaveController::new(&GENERATOR, timer, &config).with_log(&FG_LOG_STREAM);

    for step in 0usize.. {
        let (waveform, frequency_hz, amplitude) = DEMO[step % DEMO.len()];
        let result = match waveform {
            Waveform::Sine => controller.configure_sine(frequency_hz, amplitude).map(|_| ()),
            Waveform::Triangle => controller.configure_triangle(frequency_hz, amplitude).map(|_| ()),
            Waveform::Sawtooth => controller.configure_sawtooth(frequency_hz, amplitude).map(|_| ()),
            Waveform::Off => {
                controller.stop();
                Ok(())
            }
        };
        if let Err(e) = result {
            rt_error!(FG_LOG_STREAM, timestamp_us(), "demo step {}: {}", step, e);
        }

        for _ in 0..50 {
            if let Some(fault) = FAULT.take() {
                controller.stop();
                rt_warn!(
                    FG_LOG_STREAM,
                    timestamp_us(),
                    "{} fault (sample {}, total {}), output stopped",
                    fault.code,
                    fault.data,
                    fault.count
                );
            }

            drain_to_uart(&mut uart, &[&TICK_LOG_STREAM, &FG_LOG_STREAM]);
            FreeRtos::delay_ms(100);
        }

        let stats = STATS.snapshot();
        rt_info!(
            FG_LOG_STREAM,
            timestamp_us(),
            "ticks {} sent {} failed {}",
            stats.ticks,
            stats.sent,
            stats.failures
        );
    }

    Ok(())
}
