//! Basic usage example for spectra
//!
//! Complex FFT, real FFT, power spectrum and window functions.
//! Run with `cargo run --example basic_usage`.

use spectra::{
    fft, power_phase_spectrum, power_spectrum, real_fft, real_ifft, window, Complex64, FftEngine,
    FftImpl, WindowType,
};

fn main() {
    println!("=== spectra Basic Usage Example ===\n");

    // 1. Complex FFT
    println!("1. Complex FFT");
    let engine = FftEngine::<f64>::new();
    let mut data: Vec<Complex64> = [1.0, 2.0, 3.0, 4.0]
        .iter()
        .map(|&x| Complex64::new(x, 0.0))
        .collect();
    println!("   Input: {:?}", data.iter().map(|c| c.re).collect::<Vec<_>>());
    engine.fft(&mut data).unwrap();
    println!(
        "   FFT: {:?}",
        data.iter()
            .map(|c| format!("{:.2}{:+.2}i", c.re, c.im))
            .collect::<Vec<_>>()
    );
    engine.ifft(&mut data).unwrap();
    println!("   IFFT: {:?}", data.iter().map(|c| c.re).collect::<Vec<_>>());

    let scaled = fft(&data, false, 4.0).unwrap();
    println!("   Unnormalized DC bin: {:.2}", scaled[0].re);
    println!();

    // 2. Real FFT
    println!("2. Real FFT");
    let signal = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let half = real_fft(&signal, 1.0).unwrap();
    println!("   {} samples -> {} bins", signal.len(), half.len());
    let back = real_ifft(&half, 1.0).unwrap();
    println!("   Round trip: {:?}", back.iter().map(|x| format!("{:.2}", x)).collect::<Vec<_>>());
    println!();

    // 3. Power spectrum of a pure tone
    println!("3. Power spectrum");
    let n = 64;
    let tone: Vec<f64> = (0..n)
        .map(|i| 2.0 * (2.0 * std::f64::consts::PI * 4.0 * i as f64 / n as f64).sin())
        .collect();
    let power = power_spectrum(&tone, 1.0).unwrap();
    let peak = power
        .iter()
        .enumerate()
        .fold((0, 0.0), |best, (k, &p)| if p > best.1 { (k, p) } else { best });
    println!("   Peak at bin {} with mean power {:.3}", peak.0, peak.1 / n as f64);
    let phases = power_phase_spectrum(&tone, 1.0).unwrap();
    println!("   Phase at peak: {:.3} rad", phases[peak.0].phase);
    println!();

    // 4. Windows
    println!("4. Window functions");
    for kind in WindowType::ALL {
        let w = window::<f64>(kind, 8).unwrap();
        println!(
            "   {:<8} {:?}",
            kind,
            w.iter().map(|x| format!("{:.2}", x)).collect::<Vec<_>>()
        );
    }
}
