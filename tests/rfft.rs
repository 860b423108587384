//! Real FFT and its inverse.

use proptest::prelude::*;
use spectra::rfft::{half_spectrum_len, RealFftImpl};
use spectra::{fft, real_fft, real_ifft, Complex64, FftEngine, FftError};

const EPSILON: f64 = 1e-9;

/// The half-spectrum equals the first `N/2 + 1` bins of the complex
/// transform, up to the complex transform's `1/N` scaling.
#[test]
fn matches_complex_transform() {
    let n = 64;
    let signal: Vec<f64> = (0..n)
        .map(|i| libm::cos(i as f64 * 0.21) - 0.3 * libm::sin(i as f64 * 1.7))
        .collect();
    let half = real_fft(&signal, 1.0).unwrap();
    let complex: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let full = fft(&complex, false, n as f64).unwrap();
    assert_eq!(half.len(), half_spectrum_len(n));
    for (k, (a, b)) in half.iter().zip(full.iter()).enumerate() {
        assert!((a.re - b.re).abs() < EPSILON, "bin {} re", k);
        assert!((a.im - b.im).abs() < EPSILON, "bin {} im", k);
    }
}

#[test]
fn amplitude_scales_linearly() {
    let signal = [1.0f64, 0.5, -0.25, 2.0, 0.0, -1.0, 3.0, 0.75];
    let unit = real_fft(&signal, 1.0).unwrap();
    let triple = real_fft(&signal, 3.0).unwrap();
    for (a, b) in unit.iter().zip(triple.iter()) {
        assert!((a.re * 3.0 - b.re).abs() < EPSILON);
        assert!((a.im * 3.0 - b.im).abs() < EPSILON);
    }
}

#[test]
fn invalid_lengths() {
    assert_eq!(real_fft::<f64>(&[], 1.0), Err(FftError::InvalidLength(0)));
    assert_eq!(real_fft(&[1.0f64; 2], 1.0), Err(FftError::InvalidLength(2)));
    assert_eq!(real_fft(&[1.0f64; 10], 1.0), Err(FftError::InvalidLength(10)));
    assert_eq!(
        real_ifft(&[Complex64::zero(); 4], 1.0),
        Err(FftError::InvalidLength(4))
    );
}

#[test]
fn engine_shares_table_between_directions() {
    let engine = FftEngine::<f64>::new();
    let signal = vec![0.5f64; 256];
    let half = engine.real_fft(&signal, 1.0).unwrap();
    engine.real_ifft(&half, 1.0).unwrap();
    // the packed half-size pass and the unfold step use different sizes
    assert_eq!(engine.cached_tables(), 2);
}

proptest! {
    #[test]
    fn prop_real_roundtrip(
        exp in 2usize..11,
        ref seed in proptest::collection::vec(-100.0f64..100.0, 1024)
    ) {
        let n = 1usize << exp;
        let signal = &seed[..n];
        let half = real_fft(signal, 1.0).unwrap();
        let back = real_ifft(&half, 1.0).unwrap();
        prop_assert_eq!(back.len(), n);
        for (a, b) in signal.iter().zip(back.iter()) {
            prop_assert!((a - b).abs() <= 1e-9 * (1.0 + a.abs()));
        }
    }
}
