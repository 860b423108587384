//! Demonstrates enabling verbose logging for spectra.
use spectra::stft::{istft, stft};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    let signal: Vec<f32> = (0..2048).map(|i| (i as f32 * 0.1).sin()).collect();
    let spec = stft(&signal, 128).unwrap();
    istft(&spec, 128).unwrap();
}
