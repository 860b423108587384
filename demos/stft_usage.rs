//! STFT usage example for spectra
//! Demonstrates forward and inverse STFT.
//! Run with `cargo run --example stft_usage`.
//!
//! When built with `--features parallel`, also runs the parallel STFT helpers.

#[cfg(feature = "parallel")]
use spectra::stft::{inverse_parallel, parallel};
use spectra::stft::{hop_size, StftImpl};
use spectra::{istft, stft, FftEngine, StftConfig, WindowType};

fn main() {
    let sample_rate = 8000.0;
    let signal: Vec<f64> = (0..8192)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * 440.0 * t).sin()
                + 0.5 * (2.0 * std::f64::consts::PI * 1250.0 * t).sin()
        })
        .collect();

    let window_size = 256;
    let hop = hop_size::<f64>(window_size, WindowType::Hamming).unwrap();
    let spec = stft(&signal, window_size).unwrap();
    println!(
        "Spectrogram: {} bins x {} frames (hop {})",
        spec.bins(),
        spec.frames(),
        hop
    );

    let power = spec.power();
    if let Some(first) = power.frame(0) {
        let (bin, _) = first
            .iter()
            .enumerate()
            .fold((0, 0.0), |best, (k, &p)| if p > best.1 { (k, p) } else { best });
        println!(
            "Loudest bin in frame 0: {} (~{:.0} Hz)",
            bin,
            spec.bin_frequency(bin, sample_rate).unwrap_or(0.0)
        );
    }

    let recovered = istft(&spec, window_size).unwrap();
    let max_err = recovered
        .iter()
        .zip(signal.iter())
        .take(recovered.len() - hop)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!("Reconstructed {} samples, max error {:.2e}", recovered.len(), max_err);

    let engine = FftEngine::<f64>::new();
    let config = StftConfig::new(window_size)
        .with_window(WindowType::Hanning)
        .with_hop(window_size / 4);
    let dense = engine.stft_with(&signal, &config).unwrap();
    println!("Hanning, hop {}: {} frames", window_size / 4, dense.frames());

    #[cfg(feature = "parallel")]
    {
        let par = parallel(&signal, &config).unwrap();
        let back = inverse_parallel(&par, &config).unwrap();
        println!("Parallel: {} frames, {} samples", par.frames(), back.len());
    }
}
