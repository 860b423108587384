//! STFT/ISTFT reconstruction and framing errors.

use std::cell::Cell;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spectra::stft::{frame_count, hop_size, output_len, StftImpl};
use spectra::{
    istft, stft, FftEngine, FftError, FftImpl, Spectrogram, StftConfig, TrigTable, WindowType,
};

/// Tolerance for reconstructed samples.
const EPSILON: f64 = 1e-9;

fn noise(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// With W = 128 the Hamming energy is about 50.48, so hop is 50 and a
/// 2048-sample signal yields floor(1920/50) - 1 = 37 frames.
#[test]
fn hamming_geometry_for_128() {
    let hop = hop_size::<f64>(128, WindowType::Hamming).unwrap();
    assert_eq!(hop, 50);
    assert_eq!(frame_count(2048, 128, hop), 37);
    let spec = stft(&noise(2048, 1), 128).unwrap();
    assert_eq!(spec.bins(), 65);
    assert_eq!(spec.frames(), 37);
}

/// Hamming never reaches zero, so every sample up to the end of the last
/// frame is reconstructed; the trailing `hop` samples stay zero.
#[test]
fn roundtrip_unmodified_spectrogram() {
    let signal = noise(2048, 2);
    let spec = stft(&signal, 128).unwrap();
    let out = istft(&spec, 128).unwrap();
    assert_eq!(out.len(), output_len(37, 128, 50));
    let covered = 50 * 36 + 128;
    for i in 0..covered {
        assert!((out[i] - signal[i]).abs() < EPSILON, "sample {}", i);
    }
    assert!(out[covered..].iter().all(|&v| v == 0.0));
}

#[test]
fn roundtrip_every_window_kind() {
    let signal = noise(1024, 3);
    let engine = FftEngine::<f64>::new();
    for kind in WindowType::ALL {
        let config = StftConfig::new(64).with_window(kind).with_hop(16);
        let spec = engine.stft_with(&signal, &config).unwrap();
        let out = engine.istft_with(&spec, &config).unwrap();
        let window = spectra::window::<f64>(kind, 64).unwrap();
        for (i, (&o, &s)) in out.iter().zip(signal.iter()).enumerate() {
            let weight: f64 = (0..spec.frames())
                .filter(|&t| t * 16 <= i && i < t * 16 + 64)
                .map(|t| window[i - t * 16])
                .sum();
            // near-zero weights only amplify rounding noise
            if weight.abs() > 1e-6 {
                assert!((o - s).abs() < 1e-7, "{} sample {}", kind, i);
            }
        }
    }
}

#[test]
fn signal_exactly_one_window_long_has_no_frames() {
    let spec = stft(&noise(128, 4), 128).unwrap();
    assert!(spec.is_empty());
    assert_eq!(spec.frames(), 0);
    let out = istft(&spec, 128).unwrap();
    assert_eq!(out.len(), 128);
    assert!(out.iter().all(|&v| v == 0.0));
}

#[test]
fn framing_errors() {
    assert_eq!(
        stft(&[0.0f64; 64], 128),
        Err(FftError::InsufficientLength(64))
    );
    assert_eq!(stft(&[0.0f64; 512], 100), Err(FftError::InvalidLength(100)));
    assert_eq!(stft(&[0.0f64; 512], 1), Err(FftError::InvalidSize(1)));

    let wrong_bins = Spectrogram::<f64>::filled(33, 4, spectra::Complex64::zero());
    assert_eq!(istft(&wrong_bins, 128), Err(FftError::InvalidLength(33)));
}

#[test]
fn power_matrix_matches_cells() {
    let spec = stft(&noise(1024, 5), 64).unwrap();
    let power = spec.power();
    assert_eq!(power.bins(), spec.bins());
    assert_eq!(power.frames(), spec.frames());
    for t in 0..spec.frames() {
        for k in 0..spec.bins() {
            let c = spec.get(k, t).unwrap();
            assert_eq!(power.get(k, t), Some(c.norm_sqr()));
        }
    }
}

/// Rebuilding from power and phase then inverting restores the signal.
#[test]
fn power_phase_roundtrip_through_istft() {
    let signal = noise(1024, 6);
    let spec = stft(&signal, 64).unwrap();
    let rebuilt = Spectrogram::from_power_phase(&spec.power(), &spec).unwrap();
    let a = istft(&spec, 64).unwrap();
    let b = istft(&rebuilt, 64).unwrap();
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < 1e-7);
    }
}

/// Engine that only supplies tables; everything else comes from the
/// blanket trait impls.
struct CountingEngine {
    inner: FftEngine<f64>,
    lookups: Cell<usize>,
}

impl FftImpl<f64> for CountingEngine {
    fn trig_table(&self, n: usize) -> Result<Arc<TrigTable<f64>>, FftError> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.trig_table(n)
    }
}

#[test]
fn custom_engine_gets_stft_through_blanket_impls() {
    let engine = CountingEngine {
        inner: FftEngine::new(),
        lookups: Cell::new(0),
    };
    let signal = noise(1024, 7);
    let spec = engine.stft(&signal, 64).unwrap();
    assert_eq!(spec, stft(&signal, 64).unwrap());
    // butterflies and unfold each fetch a table per frame
    assert_eq!(engine.lookups.get(), 2 * spec.frames());
}
