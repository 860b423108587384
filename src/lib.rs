//! # spectra - radix-2 FFT and STFT for whole in-memory signals
//!
//! A small DSP library converting audio signals between the time and
//! frequency domains and back.
//!
//! ## Features
//!
//! - **Complex FFT**: iterative radix-2 Cooley–Tukey with bit-reversal and a
//!   cached quarter-wave trig table
//! - **Real FFT**: half-size packed transform producing the `N/2 + 1`
//!   half-spectrum, and its inverse
//! - **Power spectra**: one-sided power and power+phase
//! - **Windows**: Box, Hanning, Hamming, Blackman, Parzen, Welch
//! - **STFT/ISTFT**: energy-derived hop, overlap-add reconstruction
//!   normalized by accumulated window weight
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` impls
//! - `parallel`: Rayon-backed `stft::parallel` and `stft::inverse_parallel`
//! - `verbose-logging`: emit `log` records for table builds and STFT framing
//!
//! ## Conventions
//!
//! All transform lengths are powers of two. The forward complex transform
//! scales by `amplitude / N` and the inverse by `amplitude`; the real FFT
//! is unnormalized and its inverse divides by `N`.
//!
//! ```
//! use spectra::{real_fft, real_ifft};
//!
//! let signal = [0.0f64, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0];
//! let half = real_fft(&signal, 1.0).unwrap();
//! assert_eq!(half.len(), 5);
//! let back = real_ifft(&half, 1.0).unwrap();
//! assert!((back[1] - 1.0).abs() < 1e-12);
//! ```

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Forward a formatted message to `log::debug!` under `verbose-logging`.
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "verbose-logging")]
        {
            log::debug!($($arg)*);
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Forward a formatted message to `log::trace!` under `verbose-logging`.
macro_rules! trace_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "verbose-logging")]
        {
            log::trace!($($arg)*);
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub(crate) use debug_log;
pub(crate) use trace_log;

/// Scalar and complex number types
pub mod num;

/// Quarter-wave trig tables and their LRU cache
pub mod trig;

/// Complex radix-2 FFT engine
pub mod fft;

/// Real-input FFT and its inverse
pub mod rfft;

/// One-sided power and power+phase spectra
pub mod spectrum;

/// Window functions
pub mod window;

/// Short-Time Fourier Transform and overlap-add inverse
pub mod stft;

pub use fft::{fft, Direction, FftEngine, FftError, FftImpl};
pub use num::{Complex, Complex32, Complex64, Float};
pub use rfft::{full_spectrum, real_fft, real_ifft, real_ifft_split, zero_pad, RealFftImpl};
pub use spectrum::{power_phase_spectrum, power_spectrum, PowerPhase, SpectralAnalysis};
pub use stft::{istft, stft, PowerMatrix, Spectrogram, StftConfig, StftImpl};
pub use trig::{TrigTable, TrigTableCache, DEFAULT_CACHE_CAPACITY};
pub use window::{apply_window, generate as window, WindowType};
