//! One-sided power spectra derived from the real FFT.
//!
//! Values are a power spectral density: for `y = a·sin(2πfn/N)` the bin at
//! `f` holds `a²N/2`, which integrated over the bin width `1/N` gives the
//! mean power `a²/2`. A constant signal `y = a` yields `a²N` at DC.

use alloc::vec::Vec;

use crate::fft::{FftEngine, FftError};
use crate::num::{Complex, Float};
use crate::rfft::RealFftImpl;

/// Power and phase of a single frequency bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerPhase<T: Float> {
    pub power: T,
    /// Phase angle in radians, `(-π, π]`.
    pub phase: T,
}

impl<T: Float> PowerPhase<T> {
    /// Complex bin with `|c|² == power` and `arg(c) == phase`.
    pub fn to_complex(self) -> Complex<T> {
        Complex::from_polar(self.power.sqrt(), self.phase)
    }
}

/// Spectral analysis on top of [`RealFftImpl`].
pub trait SpectralAnalysis<T: Float>: RealFftImpl<T> {
    /// Half-spectrum scaled so the one-sided power lands in `|bin|²`.
    fn psd_spectrum(&self, signal: &[T], amplitude: T) -> Result<Vec<Complex<T>>, FftError> {
        let n = signal.len();
        let n_t = T::from_usize(n).ok_or(FftError::InvalidLength(n))?;
        let scale = (T::from_f64(2.0) * amplitude / n_t).sqrt();
        self.real_fft(signal, scale)
    }

    /// `|X[k]|²` per bin with the DC and Nyquist bins halved.
    fn power_spectrum(&self, signal: &[T], amplitude: T) -> Result<Vec<T>, FftError> {
        let freq = self.psd_spectrum(signal, amplitude)?;
        let mut power: Vec<T> = freq.iter().map(|c| c.norm_sqr()).collect();
        halve_edges(&mut power, |p| p);
        Ok(power)
    }

    /// [`SpectralAnalysis::power_spectrum`] paired with each bin's phase.
    ///
    /// Only the power component of the DC and Nyquist bins is halved.
    fn power_phase_spectrum(
        &self,
        signal: &[T],
        amplitude: T,
    ) -> Result<Vec<PowerPhase<T>>, FftError> {
        let freq = self.psd_spectrum(signal, amplitude)?;
        let mut out: Vec<PowerPhase<T>> = freq
            .iter()
            .map(|c| PowerPhase {
                power: c.norm_sqr(),
                phase: c.arg(),
            })
            .collect();
        halve_edges(&mut out, |pp| &mut pp.power);
        Ok(out)
    }
}

impl<T: Float, U: RealFftImpl<T> + ?Sized> SpectralAnalysis<T> for U {}

fn halve_edges<E, T: Float>(bins: &mut [E], field: impl Fn(&mut E) -> &mut T) {
    let half = T::from_f64(0.5);
    if let Some(first) = bins.first_mut() {
        *field(first) *= half;
    }
    if let Some(last) = bins.last_mut() {
        *field(last) *= half;
    }
}

/// One-sided power spectrum of `signal` using a fresh engine.
pub fn power_spectrum<T: Float>(signal: &[T], amplitude: T) -> Result<Vec<T>, FftError> {
    FftEngine::<T>::default().power_spectrum(signal, amplitude)
}

/// One-sided power and phase spectrum of `signal` using a fresh engine.
pub fn power_phase_spectrum<T: Float>(
    signal: &[T],
    amplitude: T,
) -> Result<Vec<PowerPhase<T>>, FftError> {
    FftEngine::<T>::default().power_phase_spectrum(signal, amplitude)
}
