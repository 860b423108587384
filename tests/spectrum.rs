//! Power spectra of synthetic tones.

use std::f64::consts::PI;

use spectra::spectrum::SpectralAnalysis;
use spectra::{power_phase_spectrum, power_spectrum, FftEngine, FftError};

const EPSILON: f64 = 1e-9;

fn tone(n: usize, bin: usize, amplitude: f64, phase: f64) -> Vec<f64> {
    (0..n)
        .map(|i| amplitude * libm::sin(2.0 * PI * (bin * i) as f64 / n as f64 + phase))
        .collect()
}

/// The tone's bin carries `a²N/2`, i.e. mean power `a²/2` over a bin of
/// width `1/N`; every other bin is empty.
#[test]
fn pure_tone_power() {
    let n = 256;
    for (bin, a) in [(3usize, 1.0f64), (17, 0.25), (100, 4.0)] {
        let p = power_spectrum(&tone(n, bin, a, 0.0), 1.0).unwrap();
        assert_eq!(p.len(), n / 2 + 1);
        assert!((p[bin] / n as f64 - a * a / 2.0).abs() < EPSILON, "bin {}", bin);
        for (k, &v) in p.iter().enumerate() {
            if k != bin {
                assert!(v.abs() < 1e-6, "leak at {}: {}", k, v);
            }
        }
    }
}

#[test]
fn amplitude_scales_power_linearly() {
    let signal = tone(64, 5, 1.0, 0.3);
    let unit = power_spectrum(&signal, 1.0).unwrap();
    let double = power_spectrum(&signal, 2.0).unwrap();
    for (a, b) in unit.iter().zip(double.iter()) {
        assert!((2.0 * a - b).abs() < EPSILON);
    }
}

#[test]
fn nyquist_bin_is_halved() {
    let n = 16;
    let alternating: Vec<f64> = (0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let p = power_spectrum(&alternating, 1.0).unwrap();
    // a constant of the same magnitude at DC gets the same treatment
    let dc = power_spectrum(&vec![1.0f64; n], 1.0).unwrap();
    assert!((p[n / 2] - dc[0]).abs() < EPSILON);
    assert!((dc[0] - n as f64).abs() < EPSILON);
}

#[test]
fn phase_tracks_shift() {
    let n = 128;
    let shift = 0.7;
    let pp = power_phase_spectrum(&tone(n, 9, 1.0, shift), 1.0).unwrap();
    // sin(x + φ) has phase φ - π/2 at its bin
    assert!((pp[9].phase - (shift - PI / 2.0)).abs() < 1e-9);
}

#[test]
fn engine_and_free_function_agree() {
    let signal = tone(32, 2, 1.5, 0.0);
    let engine = FftEngine::<f64>::new();
    assert_eq!(
        engine.power_spectrum(&signal, 1.0).unwrap(),
        power_spectrum(&signal, 1.0).unwrap()
    );
}

#[test]
fn invalid_length_is_reported() {
    assert_eq!(
        power_phase_spectrum(&[0.0f64; 24], 1.0),
        Err(FftError::InvalidLength(24))
    );
}
