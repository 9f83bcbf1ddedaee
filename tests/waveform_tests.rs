//! Waveform sequence tests (controller + shared generator)

use mcp4922_wavegen::wave::{lookup, ConfigError, FrequencyError, SINE_TABLE, TABLE_LEN};
use mcp4922_wavegen::{GeneratorState, SampleTimer, SharedGenerator, SynthConfig, WaveController, Waveform};

/// 64 MHz counter, 1 kHz = 250 ticks
const CLOCK_HZ: u32 = 64_000_000;

#[derive(Default)]
struct MockTimer {
    periods: Vec<u32>,
    fail: bool,
}

impl SampleTimer for MockTimer {
    type Error = &'static str;

    fn clock_hz(&self) -> u32 {
        CLOCK_HZ
    }

    fn set_period(&mut self, ticks: u32) -> Result<(), Self::Error> {
        if self.fail {
            return Err("timer busy");
        }
        self.periods.push(ticks);
        Ok(())
    }
}

fn controller(generator: &SharedGenerator) -> WaveController<'_, MockTimer> {
    WaveController::new(generator, MockTimer::default(), &SynthConfig::default())
}

fn take(generator: &SharedGenerator, n: usize) -> Vec<u16> {
    (0..n).map(|_| generator.advance().get()).collect()
}

// ============================================================================
// Sine
// ============================================================================

#[test]
fn test_sine_full_scale_replays_table() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);

    let rate = ctl.configure_sine(1000.0, 4095).unwrap();
    assert_eq!(rate.period_ticks, 250);
    assert_eq!(ctl.timer().periods, vec![250]);

    let samples = take(&generator, TABLE_LEN);
    assert_eq!(samples, SINE_TABLE.to_vec());

    // Next tick wraps to index 0
    assert_eq!(generator.advance().get(), SINE_TABLE[0]);
    assert_eq!(generator.snapshot().phase_index(), 1);
}

#[test]
fn test_sine_half_scale_truncates() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_sine(500.0, 2048).unwrap();

    for i in 0..TABLE_LEN {
        let expected = (lookup(i) as u32 * 2048 / 4095) as u16;
        assert_eq!(generator.advance().get(), expected, "index {}", i);
    }
}

#[test]
fn test_sine_zero_amplitude_is_flat() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_sine(100.0, 0).unwrap();

    assert!(take(&generator, 300).iter().all(|&v| v == 0));
}

#[test]
fn test_sine_phase_stays_in_range() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_sine(1000.0, 4095).unwrap();

    for _ in 0..1000 {
        generator.advance();
        assert!(generator.snapshot().phase_index() < TABLE_LEN);
    }
}

// ============================================================================
// Triangle
// ============================================================================

#[test]
fn test_triangle_rises_then_falls() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_triangle(1000.0, 4095).unwrap();

    let samples = take(&generator, 256);

    // Up 128 ticks to the peak, down 128 ticks to zero
    assert!(samples[..128].windows(2).all(|w| w[1] > w[0]));
    assert_eq!(samples[127], 4095);
    assert!(samples[127..].windows(2).all(|w| w[1] < w[0]));
    assert_eq!(samples[255], 0);
}

#[test]
fn test_triangle_is_symmetric_and_periodic() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_triangle(1000.0, 4095).unwrap();

    let first = take(&generator, 256);
    let second = take(&generator, 256);
    assert_eq!(first, second);

    // Falling half mirrors the rising half around the peak
    for k in 1..128 {
        assert_eq!(first[127 - k], first[127 + k], "offset {}", k);
    }
}

#[test]
fn test_triangle_stays_within_amplitude() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_triangle(250.0, 1000).unwrap();

    let samples = take(&generator, 1024);
    assert!(samples.iter().all(|&v| v <= 1000));
    assert_eq!(samples.iter().copied().max(), Some(1000));
    assert_eq!(samples.iter().copied().min(), Some(0));

    let state = generator.snapshot();
    assert!(state.level_raw() >= 0);
    assert!(state.level() <= state.amplitude());
}

// ============================================================================
// Sawtooth
// ============================================================================

#[test]
fn test_sawtooth_wraps_every_256_ticks() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);

    let rate = ctl.configure_sawtooth(1000.0, 4095).unwrap();
    assert_eq!(rate.period_ticks, 250);
    assert!((rate.tick_hz() - 256_000.0).abs() < 1.0);

    let samples = take(&generator, 512);
    assert!(samples[..255].windows(2).all(|w| w[1] > w[0]));
    assert_eq!(samples[255], 0);
    assert_eq!(&samples[..256], &samples[256..]);
}

#[test]
fn test_sawtooth_partial_amplitude() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_sawtooth(100.0, 1000).unwrap();

    let samples = take(&generator, 256);
    assert!(samples.iter().all(|&v| v < 1000));
    assert!(samples[..255].windows(2).all(|w| w[1] > w[0]));
    assert_eq!(samples[255], 0);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_amplitude_clamped() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);

    ctl.configure_triangle(1000.0, 10_000).unwrap();
    assert_eq!(ctl.state().amplitude(), 4095);

    let samples = take(&generator, 256);
    assert_eq!(samples.iter().copied().max(), Some(4095));
}

#[test]
fn test_switch_resets_progress() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);

    ctl.configure_sine(1000.0, 4095).unwrap();
    take(&generator, 37);

    ctl.configure_sawtooth(1000.0, 4095).unwrap();
    let state = ctl.state();
    assert_eq!(state.waveform(), Waveform::Sawtooth);
    assert_eq!(state.phase_index(), 0);
    assert_eq!(state.level(), 0);

    // Reconfiguring the same waveform restarts it too
    ctl.configure_sine(1000.0, 4095).unwrap();
    assert_eq!(generator.advance().get(), SINE_TABLE[0]);
}

#[test]
fn test_rejected_frequency_changes_nothing() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_sine(1000.0, 4095).unwrap();
    take(&generator, 10);
    let before = ctl.state();

    for bad in [0.0, -5.0, f32::NAN, f32::INFINITY] {
        assert!(ctl.configure_triangle(bad, 2000).is_err(), "{} accepted", bad);
    }
    assert_eq!(
        ctl.configure_sawtooth(0.0, 2000),
        Err(ConfigError::Frequency(FrequencyError::NotPositive))
    );
    // 10 kHz * 256 = 2.56 MHz, above the default 500 kHz bound
    assert_eq!(
        ctl.configure_sine(10_000.0, 2000),
        Err(ConfigError::Frequency(FrequencyError::AboveMaxRate))
    );

    assert_eq!(ctl.state(), before);
    assert_eq!(ctl.timer().periods, vec![250]);
}

#[test]
fn test_timer_failure_changes_nothing() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_sine(1000.0, 4095).unwrap();
    let before = ctl.state();

    let mut failing = WaveController::new(
        &generator,
        MockTimer {
            fail: true,
            ..MockTimer::default()
        },
        &SynthConfig::default(),
    );
    assert_eq!(
        failing.configure_triangle(500.0, 1000),
        Err(ConfigError::Timer("timer busy"))
    );
    assert_eq!(failing.sample_rate(), None);
    assert_eq!(generator.snapshot(), before);
}

#[test]
fn test_configured_max_sample_rate() {
    let generator = SharedGenerator::new();
    let config = SynthConfig::default().with_max_sample_rate(20_000);
    let mut ctl = WaveController::new(&generator, MockTimer::default(), &config);

    // 50 Hz * 256 = 12.8 kHz fits, 100 Hz * 256 = 25.6 kHz does not
    assert_eq!(ctl.configure_sine(50.0, 4095).unwrap().period_ticks, 5000);
    assert_eq!(
        ctl.configure_sine(100.0, 4095),
        Err(ConfigError::Frequency(FrequencyError::AboveMaxRate))
    );
}

#[test]
fn test_stop_emits_zero_and_keeps_period() {
    let generator = SharedGenerator::new();
    let mut ctl = controller(&generator);
    ctl.configure_sine(300.0, 3000).unwrap();
    take(&generator, 5);

    ctl.stop();
    let state = ctl.state();
    assert_eq!(state.waveform(), Waveform::Off);
    assert_eq!(state.amplitude(), 3000);
    assert_eq!(state.period_ticks(), 833);
    assert!(take(&generator, 10).iter().all(|&v| v == 0));
}

#[test]
fn test_idle_generator_outputs_zero() {
    let generator = SharedGenerator::new();
    assert_eq!(generator.snapshot(), GeneratorState::OFF);
    assert!(take(&generator, 4).iter().all(|&v| v == 0));
}
