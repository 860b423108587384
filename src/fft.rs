//! Complex Fast Fourier Transform.
//!
//! Iterative decimation-in-time radix-2
//! [Cooley–Tukey](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! transform. Twiddle factors come from a [`TrigTable`] served by the
//! engine's own [`TrigTableCache`].
//!
//! Normalization is asymmetric: the forward transform multiplies by
//! `amplitude / N`, the inverse by `amplitude` alone, so a forward/inverse
//! round trip with the default amplitude reproduces the input.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

pub use crate::num::{Complex, Complex32, Complex64, Float};
use crate::trig::{TrigTable, TrigTableCache};

/// Errors returned by the transform, window and STFT routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// Length is not a power of two (or otherwise unusable), or two buffers
    /// that must agree in length do not.
    InvalidLength(usize),
    /// Window or table size below the minimum, or not a multiple of 4.
    InvalidSize(usize),
    /// Signal of the given length is shorter than one analysis window.
    InsufficientLength(usize),
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::InvalidLength(n) => {
                write!(f, "invalid transform length {} (expected a power of two)", n)
            }
            FftError::InvalidSize(n) => write!(f, "invalid window or table size {}", n),
            FftError::InsufficientLength(n) => {
                write!(f, "signal of length {} is shorter than one window", n)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// `e^{-2πi kn/N}` twiddles, scaled by `1/N`.
    #[default]
    Forward,
    /// `e^{+2πi kn/N}` twiddles, unscaled.
    Inverse,
}

impl Direction {
    pub fn from_inverse(inverse: bool) -> Self {
        if inverse {
            Direction::Inverse
        } else {
            Direction::Forward
        }
    }

    #[inline]
    fn sign(self) -> isize {
        match self {
            Direction::Forward => -1,
            Direction::Inverse => 1,
        }
    }
}

/// Check that `n` is a usable radix-2 length.
#[inline]
pub fn check_power_of_two(n: usize) -> Result<(), FftError> {
    if n == 0 || !n.is_power_of_two() {
        return Err(FftError::InvalidLength(n));
    }
    Ok(())
}

/// Core transform operations shared by every engine.
///
/// Implementors only provide table access and the unscaled butterfly pass;
/// the scaled entry points are default methods.
pub trait FftImpl<T: Float> {
    /// Quarter-wave table for transform size `n` (a multiple of 4).
    fn trig_table(&self, n: usize) -> Result<Arc<TrigTable<T>>, FftError>;

    /// Bit-reverse `data` and run all butterfly stages without any scaling.
    fn butterflies(&self, data: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
        let n = data.len();
        check_power_of_two(n)?;
        crate::trace_log!("radix-2 pass n={} {:?}", n, direction);
        bit_reverse_permute(data);
        if n < 2 {
            return Ok(());
        }
        // n == 2 only ever uses the rotation index 0.
        let table = if n >= 4 {
            Some(self.trig_table(n)?)
        } else {
            None
        };
        let levels = n.trailing_zeros() as usize;
        let sign = direction.sign();
        for m in 0..levels {
            let step = 1usize << m;
            let rot = sign * (1isize << (levels - 1 - m));
            for k in 0..step {
                let w = match &table {
                    Some(t) => t.complex(rot * k as isize),
                    None => Complex::one(),
                };
                let mut i = k;
                while i < n {
                    let t = data[i + step] * w;
                    data[i + step] = data[i] - t;
                    data[i] = data[i] + t;
                    i += 2 * step;
                }
            }
        }
        Ok(())
    }

    /// In-place transform scaled by `amplitude` (and `1/N` when forward).
    fn transform_in_place(
        &self,
        data: &mut [Complex<T>],
        direction: Direction,
        amplitude: T,
    ) -> Result<(), FftError> {
        self.butterflies(data, direction)?;
        let n = data.len();
        let scale = match direction {
            Direction::Forward => {
                amplitude / T::from_usize(n).ok_or(FftError::InvalidLength(n))?
            }
            Direction::Inverse => amplitude,
        };
        scale_in_place(data, scale);
        Ok(())
    }

    /// Out-of-place transform; `inverse == false` is the forward direction.
    fn transform(
        &self,
        data: &[Complex<T>],
        inverse: bool,
        amplitude: T,
    ) -> Result<Vec<Complex<T>>, FftError> {
        let mut out = data.to_vec();
        self.transform_in_place(&mut out, Direction::from_inverse(inverse), amplitude)?;
        Ok(out)
    }

    /// Forward transform in place with unit amplitude.
    fn fft(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.transform_in_place(data, Direction::Forward, T::one())
    }

    /// Inverse transform in place with unit amplitude.
    fn ifft(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.transform_in_place(data, Direction::Inverse, T::one())
    }
}

/// Reorder `data` into bit-reversed index order.
pub fn bit_reverse_permute<T: Float>(data: &mut [Complex<T>]) {
    let n = data.len();
    if n <= 2 {
        return;
    }
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            data.swap(i, j);
        }
    }
}

pub(crate) fn scale_in_place<T: Float>(data: &mut [Complex<T>], k: T) {
    if k == T::one() {
        return;
    }
    for c in data.iter_mut() {
        *c = c.scale(k);
    }
}

/// Single-threaded transform engine owning its trig table cache.
///
/// The cache sits behind a [`RefCell`], so an engine is cheap to share by
/// reference within a thread; use one engine per thread for parallel work.
pub struct FftEngine<T: Float> {
    cache: RefCell<TrigTableCache<T>>,
}

impl<T: Float> Default for FftEngine<T> {
    fn default() -> Self {
        Self {
            cache: RefCell::new(TrigTableCache::default()),
        }
    }
}

impl<T: Float> FftEngine<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine around a preconfigured cache.
    pub fn with_cache(cache: TrigTableCache<T>) -> Self {
        Self {
            cache: RefCell::new(cache),
        }
    }

    /// Number of trig tables currently cached.
    pub fn cached_tables(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Consume the engine and hand back its cache.
    pub fn into_cache(self) -> TrigTableCache<T> {
        self.cache.into_inner()
    }
}

impl<T: Float> FftImpl<T> for FftEngine<T> {
    fn trig_table(&self, n: usize) -> Result<Arc<TrigTable<T>>, FftError> {
        self.cache.borrow_mut().get(n)
    }
}

/// Transform `data` with a fresh engine. See [`FftImpl::transform`].
pub fn fft<T: Float>(
    data: &[Complex<T>],
    inverse: bool,
    amplitude: T,
) -> Result<Vec<Complex<T>>, FftError> {
    FftEngine::<T>::default().transform(data, inverse, amplitude)
}
