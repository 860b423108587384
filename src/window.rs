//! Tapering windows for spectral analysis and STFT framing.
//!
//! All windows are the symmetric form over `0..size` with angular step
//! `h = 2π/(size - 1)`, so both endpoints are sampled.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::fft::FftError;
use crate::num::Float;

/// Smallest window size; the angular step divides by `size - 1`.
pub const MIN_WINDOW_SIZE: usize = 2;

/// Window shape tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowType {
    /// Rectangular, all ones.
    Box,
    Hanning,
    #[default]
    Hamming,
    Blackman,
    /// Triangular taper reaching zero just outside the window.
    Parzen,
    /// Parabolic taper reaching zero just outside the window.
    Welch,
}

impl WindowType {
    pub const ALL: [WindowType; 6] = [
        WindowType::Box,
        WindowType::Hanning,
        WindowType::Hamming,
        WindowType::Blackman,
        WindowType::Parzen,
        WindowType::Welch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WindowType::Box => "box",
            WindowType::Hanning => "hanning",
            WindowType::Hamming => "hamming",
            WindowType::Blackman => "blackman",
            WindowType::Parzen => "parzen",
            WindowType::Welch => "welch",
        }
    }

    /// Coefficients of this window for `size` samples.
    pub fn generate<T: Float>(self, size: usize) -> Result<Vec<T>, FftError> {
        generate(self, size)
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when parsing an unknown window name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseWindowError;

impl fmt::Display for ParseWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown window type (expected box, hanning, hamming, blackman, parzen or welch)"
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseWindowError {}

impl FromStr for WindowType {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("rectangular") {
            return Ok(WindowType::Box);
        }
        if s.eq_ignore_ascii_case("hann") {
            return Ok(WindowType::Hanning);
        }
        WindowType::ALL
            .iter()
            .copied()
            .find(|w| s.eq_ignore_ascii_case(w.name()))
            .ok_or(ParseWindowError)
    }
}

/// Generate `size` coefficients of the `kind` window.
///
/// Fails with [`FftError::InvalidSize`] when `size < 2`.
pub fn generate<T: Float>(kind: WindowType, size: usize) -> Result<Vec<T>, FftError> {
    if size < MIN_WINDOW_SIZE {
        return Err(FftError::InvalidSize(size));
    }
    let n1 = T::from_usize(size - 1).ok_or(FftError::InvalidSize(size))?;
    let np1 = T::from_usize(size + 1).ok_or(FftError::InvalidSize(size))?;
    let two = T::from_f64(2.0);
    let h = two * T::pi() / n1;
    let mut out = Vec::with_capacity(size);
    for i in 0..size {
        // i < size fits whenever size - 1 did
        let x = T::from_usize(i).ok_or(FftError::InvalidSize(size))?;
        let v = match kind {
            WindowType::Box => T::one(),
            WindowType::Hanning => T::from_f64(0.5) - T::from_f64(0.5) * (h * x).cos(),
            WindowType::Hamming => T::from_f64(0.54) - T::from_f64(0.46) * (h * x).cos(),
            WindowType::Blackman => {
                T::from_f64(0.42) - T::from_f64(0.5) * (h * x).cos()
                    + T::from_f64(0.08) * (two * h * x).cos()
            }
            WindowType::Parzen => T::one() - ((two * x - n1) / np1).abs(),
            WindowType::Welch => {
                let r = (two * x - n1) / np1;
                T::one() - r * r
            }
        };
        out.push(v);
    }
    Ok(out)
}

/// Multiply `signal` in place by the `kind` window of the same length.
pub fn apply_window_in_place<T: Float>(signal: &mut [T], kind: WindowType) -> Result<(), FftError> {
    let window = generate::<T>(kind, signal.len())?;
    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s = *s * *w;
    }
    Ok(())
}

/// Copy of `signal` multiplied by the `kind` window of the same length.
pub fn apply_window<T: Float>(signal: &[T], kind: WindowType) -> Result<Vec<T>, FftError> {
    let mut out = signal.to_vec();
    apply_window_in_place(&mut out, kind)?;
    Ok(out)
}

/// Sum of squared coefficients of the `kind` window of length `size`.
pub fn window_energy<T: Float>(kind: WindowType, size: usize) -> Result<T, FftError> {
    let window = generate::<T>(kind, size)?;
    Ok(window.iter().fold(T::zero(), |acc, &w| acc + w * w))
}
