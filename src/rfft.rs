//! Real FFT (RFFT) built on the complex butterflies in [`crate::fft`].
//!
//! A length-`N` real signal is packed into `N/2` complex pairs (even samples
//! in the real part, odd samples in the imaginary part), transformed with a
//! half-size complex FFT and unfolded into the `N/2 + 1` bins of the
//! half-spectrum using conjugate symmetry. The inverse folds the
//! half-spectrum back into the packed form, runs the inverse butterflies and
//! de-interleaves.
//!
//! Scaling: [`RealFftImpl::real_fft`] is the unnormalized DFT times
//! `amplitude`; [`RealFftImpl::real_ifft`] divides by `N`, so the two
//! round-trip.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::{check_power_of_two, Direction, FftEngine, FftError, FftImpl};
use crate::num::{Complex, Float};

/// Number of real samples that make up a complex pair.
pub const STRIDE: usize = 2;

/// Smallest supported real transform length.
pub const MIN_LEN: usize = 4;

/// Half-spectrum length for a real transform of length `n`.
#[inline]
pub const fn half_spectrum_len(n: usize) -> usize {
    n / STRIDE + 1
}

fn check_real_len(n: usize) -> Result<(), FftError> {
    check_power_of_two(n)?;
    if n < MIN_LEN {
        return Err(FftError::InvalidLength(n));
    }
    Ok(())
}

/// Real-signal transforms, available on every [`FftImpl`].
pub trait RealFftImpl<T: Float>: FftImpl<T> {
    /// Half-spectrum of a real signal whose length is a power of two ≥ 4.
    fn real_fft(&self, signal: &[T], amplitude: T) -> Result<Vec<Complex<T>>, FftError> {
        let n = signal.len();
        check_real_len(n)?;
        let n2 = n / STRIDE;
        let n4 = n / 4;
        let n3 = 3 * n4;
        let mask = n2 - 1;

        let mut packed: Vec<Complex<T>> = signal
            .chunks_exact(STRIDE)
            .map(|pair| Complex::new(pair[0], pair[1]))
            .collect();
        self.butterflies(&mut packed, Direction::Forward)?;

        let table = self.trig_table(n)?;
        let mut out = vec![Complex::zero(); n2 + 1];
        for i in (0..=n4).rev() {
            let j = n2 - i;
            let g1 = packed[i];
            let g2 = packed[j & mask].conj();
            let h1 = g1 + g2;
            let h2 = (g1 - g2) * table.complex((n3 - i) as isize);
            out[i] = h1 + h2;
            out[j] = (h1 - h2).conj();
        }
        let half = amplitude / T::from_f64(2.0);
        crate::fft::scale_in_place(&mut out, half);
        Ok(out)
    }

    /// Real signal from its half-spectrum (length `2^k + 1`, `k ≥ 1`).
    fn real_ifft(&self, spectrum: &[Complex<T>], amplitude: T) -> Result<Vec<T>, FftError> {
        let len = spectrum.len();
        if len < 3 {
            return Err(FftError::InvalidLength(len));
        }
        let n2 = len - 1;
        check_power_of_two(n2).map_err(|_| FftError::InvalidLength(len))?;
        let n = n2 * STRIDE;
        let n4 = n2 / 2;
        let mask = n2 - 1;

        let table = self.trig_table(n)?;
        let mut packed = vec![Complex::zero(); n2];
        for i in (0..=n4).rev() {
            let j = n2 - i;
            let g1 = spectrum[i];
            let g2 = spectrum[j].conj();
            let h1 = g1 + g2;
            let h2 = (g1 - g2) * table.complex((n4 + i) as isize);
            packed[i] = h1 + h2;
            packed[j & mask] = (h1 - h2).conj();
        }
        self.butterflies(&mut packed, Direction::Inverse)?;

        let n_t = T::from_usize(n).ok_or(FftError::InvalidLength(n))?;
        let scale = amplitude / n_t;
        let mut out = Vec::with_capacity(n);
        for c in &packed {
            out.push(c.re * scale);
            out.push(c.im * scale);
        }
        Ok(out)
    }

    /// [`RealFftImpl::real_ifft`] over separate real and imaginary arrays.
    fn real_ifft_split(&self, re: &[T], im: &[T], amplitude: T) -> Result<Vec<T>, FftError> {
        if re.len() != im.len() {
            return Err(FftError::InvalidLength(im.len()));
        }
        let spectrum: Vec<Complex<T>> = re
            .iter()
            .zip(im.iter())
            .map(|(&r, &i)| Complex::new(r, i))
            .collect();
        self.real_ifft(&spectrum, amplitude)
    }

    /// Full `N`-bin spectrum of a real signal, zero-padded to a power of two.
    ///
    /// Bins above Nyquist are the conjugate mirror of the half-spectrum.
    fn full_spectrum(&self, signal: &[T], amplitude: T) -> Result<Vec<Complex<T>>, FftError> {
        let mut padded = zero_pad(signal)?;
        if padded.len() < MIN_LEN {
            padded.resize(MIN_LEN, T::zero());
        }
        let n = padded.len();
        let mut spectrum = self.real_fft(&padded, amplitude)?;
        spectrum.reserve(n - spectrum.len());
        for k in (1..n / STRIDE).rev() {
            let mirrored = spectrum[k].conj();
            spectrum.push(mirrored);
        }
        Ok(spectrum)
    }
}

impl<T: Float, U: FftImpl<T> + ?Sized> RealFftImpl<T> for U {}

/// Copy `signal` into a buffer zero-padded to the next power of two.
///
/// Signals already a power of two in length are returned unchanged.
pub fn zero_pad<T: Float>(signal: &[T]) -> Result<Vec<T>, FftError> {
    if signal.is_empty() {
        return Err(FftError::InvalidLength(0));
    }
    let target = signal
        .len()
        .checked_next_power_of_two()
        .ok_or(FftError::InvalidLength(signal.len()))?;
    let mut out = Vec::with_capacity(target);
    out.extend_from_slice(signal);
    out.resize(target, T::zero());
    Ok(out)
}

/// Half-spectrum of `signal` using a fresh engine.
pub fn real_fft<T: Float>(signal: &[T], amplitude: T) -> Result<Vec<Complex<T>>, FftError> {
    FftEngine::<T>::default().real_fft(signal, amplitude)
}

/// Real signal from a half-spectrum using a fresh engine.
pub fn real_ifft<T: Float>(spectrum: &[Complex<T>], amplitude: T) -> Result<Vec<T>, FftError> {
    FftEngine::<T>::default().real_ifft(spectrum, amplitude)
}

/// Real signal from split real/imaginary half-spectrum arrays.
pub fn real_ifft_split<T: Float>(re: &[T], im: &[T], amplitude: T) -> Result<Vec<T>, FftError> {
    FftEngine::<T>::default().real_ifft_split(re, im, amplitude)
}

/// Full Hermitian spectrum of `signal` using a fresh engine.
pub fn full_spectrum<T: Float>(signal: &[T], amplitude: T) -> Result<Vec<Complex<T>>, FftError> {
    FftEngine::<T>::default().full_spectrum(signal, amplitude)
}
