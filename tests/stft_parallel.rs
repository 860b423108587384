// Test intent: the Rayon-backed STFT paths agree with the serial ones.
#![cfg(feature = "parallel")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spectra::stft::{
    inverse_parallel, parallel, parallel_stft_threshold, set_parallel_stft_threshold, StftImpl,
    DEFAULT_PARALLEL_STFT_THRESHOLD,
};
use spectra::{FftEngine, FftError, StftConfig, WindowType};

/// Length of the synthetic input signal.
const SIGNAL_LEN: usize = 8192;
/// Analysis window length.
const WIN_LEN: usize = 256;

fn noise(len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Parallel forward and inverse produce the serial results bit for bit.
#[test]
fn parallel_matches_serial() {
    set_parallel_stft_threshold(1);
    let signal = noise(SIGNAL_LEN);
    let engine = FftEngine::<f64>::new();
    for config in [
        StftConfig::new(WIN_LEN),
        StftConfig::new(WIN_LEN)
            .with_window(WindowType::Blackman)
            .with_hop(64),
    ] {
        let serial = engine.stft_with(&signal, &config).unwrap();
        let par = parallel(&signal, &config).unwrap();
        assert_eq!(serial, par);

        let serial_out = engine.istft_with(&serial, &config).unwrap();
        let par_out = inverse_parallel(&par, &config).unwrap();
        assert_eq!(serial_out, par_out);
    }
    assert_eq!(parallel_stft_threshold(), 1);
}

#[test]
fn parallel_reports_framing_errors() {
    let config = StftConfig::new(WIN_LEN);
    assert_eq!(
        parallel(&[0.0f64; 100], &config),
        Err(FftError::InsufficientLength(100))
    );
    assert_eq!(
        parallel(&[0.0f64; 1024], &StftConfig::new(96)),
        Err(FftError::InvalidLength(96))
    );
}

#[test]
fn default_threshold_is_positive() {
    assert!(DEFAULT_PARALLEL_STFT_THRESHOLD > 0);
    assert!(parallel_stft_threshold() > 0);
}
