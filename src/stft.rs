//! Short-Time Fourier Transform (STFT) and overlap-add inverse.
//!
//! Frames are `window_size` samples long and advance by a hop derived from
//! the analysis window's energy, `hop = floor(Σ w[i]²)`, unless a hop is set
//! explicitly on [`StftConfig`]. Each frame is windowed and run through
//! [`RealFftImpl::real_fft`]; the half-spectra become the columns of a
//! [`Spectrogram`].
//!
//! The inverse transforms every column back with
//! [`RealFftImpl::real_ifft`], overlap-adds the windowed frames and divides
//! each output sample by the sum of window coefficients that covered it.
//! Samples no frame covered keep their accumulated value (zero). Exact
//! reconstruction of the covered interior assumes the spectrogram is
//! unmodified or that the window/hop pair satisfies constant overlap-add.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::{check_power_of_two, FftEngine, FftError};
use crate::num::{Complex, Float};
use crate::rfft::{half_spectrum_len, RealFftImpl, MIN_LEN};
use crate::window::{generate, window_energy, WindowType};

/// Framing parameters shared by [`StftImpl::stft_with`] and
/// [`StftImpl::istft_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StftConfig {
    window_size: usize,
    window: WindowType,
    hop: Option<usize>,
}

impl StftConfig {
    /// Hamming-windowed frames of `window_size` with the energy-derived hop.
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            window: WindowType::Hamming,
            hop: None,
        }
    }

    pub fn with_window(mut self, window: WindowType) -> Self {
        self.window = window;
        self
    }

    /// Use a fixed hop instead of the energy-derived one.
    pub fn with_hop(mut self, hop: usize) -> Self {
        self.hop = Some(hop);
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn window(&self) -> WindowType {
        self.window
    }

    /// Check the window size and resolve the hop.
    pub fn resolve_hop<T: Float>(&self) -> Result<usize, FftError> {
        check_power_of_two(self.window_size)?;
        if self.window_size < MIN_LEN {
            return Err(FftError::InvalidSize(self.window_size));
        }
        match self.hop {
            Some(0) => Err(FftError::InvalidSize(0)),
            Some(hop) => Ok(hop),
            None => hop_size::<T>(self.window_size, self.window),
        }
    }
}

/// Energy-derived hop, `floor(Σ w[i]²)`, for a `kind` window of `window_size`.
pub fn hop_size<T: Float>(window_size: usize, kind: WindowType) -> Result<usize, FftError> {
    let energy = window_energy::<T>(kind, window_size)?;
    let hop = energy.to_usize_floor();
    if hop == 0 {
        return Err(FftError::InvalidSize(window_size));
    }
    Ok(hop)
}

/// Number of frames extracted from a signal: `floor((len - window)/hop) - 1`,
/// clamped at zero.
pub fn frame_count(signal_len: usize, window_size: usize, hop: usize) -> usize {
    if hop == 0 || signal_len < window_size {
        return 0;
    }
    ((signal_len - window_size) / hop).saturating_sub(1)
}

/// Length of the buffer an inverse STFT of `frames` columns writes into.
pub fn output_len(frames: usize, window_size: usize, hop: usize) -> usize {
    hop * frames + window_size
}

/// Dense `bins × frames` grid stored frame by frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<E> {
    bins: usize,
    frames: usize,
    data: Vec<E>,
}

/// Complex time–frequency matrix produced by the STFT.
pub type Spectrogram<T> = Grid<Complex<T>>;

/// Per-cell power `|c|²` of a [`Spectrogram`].
pub type PowerMatrix<T> = Grid<T>;

impl<E: Copy> Grid<E> {
    /// Grid of `bins × frames` cells all set to `fill`.
    pub fn filled(bins: usize, frames: usize, fill: E) -> Self {
        Self {
            bins,
            frames,
            data: vec![fill; bins * frames],
        }
    }

    /// Wrap frame-major `data`; its length must be `bins * frames`.
    pub fn from_frames(bins: usize, frames: usize, data: Vec<E>) -> Result<Self, FftError> {
        if data.len() != bins * frames {
            return Err(FftError::InvalidLength(data.len()));
        }
        Ok(Self { bins, frames, data })
    }

    /// Frequency dimension.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Time dimension.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, bin: usize, frame: usize) -> Option<E> {
        if bin >= self.bins || frame >= self.frames {
            return None;
        }
        Some(self.data[frame * self.bins + bin])
    }

    pub fn get_mut(&mut self, bin: usize, frame: usize) -> Option<&mut E> {
        if bin >= self.bins || frame >= self.frames {
            return None;
        }
        Some(&mut self.data[frame * self.bins + bin])
    }

    /// All bins of one time frame.
    pub fn frame(&self, frame: usize) -> Option<&[E]> {
        if frame >= self.frames {
            return None;
        }
        Some(&self.data[frame * self.bins..(frame + 1) * self.bins])
    }

    pub fn frame_mut(&mut self, frame: usize) -> Option<&mut [E]> {
        if frame >= self.frames {
            return None;
        }
        Some(&mut self.data[frame * self.bins..(frame + 1) * self.bins])
    }

    /// Iterate frames in time order.
    pub fn iter_frames(&self) -> impl Iterator<Item = &[E]> + '_ {
        // max(1) keeps chunks_exact valid for the empty zero-bin grid
        self.data.chunks_exact(self.bins.max(1))
    }

    /// Frame-major backing storage.
    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<E> {
        self.data
    }

    /// Apply `f` to every cell, keeping the shape.
    pub fn map<F: Copy>(&self, f: impl Fn(E) -> F) -> Grid<F> {
        Grid {
            bins: self.bins,
            frames: self.frames,
            data: self.data.iter().map(|&e| f(e)).collect(),
        }
    }
}

impl<T: Float> Grid<Complex<T>> {
    /// `|c|²` for every cell.
    pub fn power(&self) -> PowerMatrix<T> {
        self.map(|c| c.norm_sqr())
    }

    /// Phase angle of every cell.
    pub fn phases(&self) -> Grid<T> {
        self.map(|c| c.arg())
    }

    /// Rebuild complex cells from a power matrix and the phases of
    /// `phase_source`. Both must have the same shape.
    pub fn from_power_phase(
        power: &PowerMatrix<T>,
        phase_source: &Spectrogram<T>,
    ) -> Result<Self, FftError> {
        if power.bins != phase_source.bins || power.frames != phase_source.frames {
            return Err(FftError::InvalidLength(power.data.len()));
        }
        let data = power
            .data
            .iter()
            .zip(phase_source.data.iter())
            .map(|(&p, c)| Complex::from_polar(p.sqrt(), c.arg()))
            .collect();
        Ok(Self {
            bins: power.bins,
            frames: power.frames,
            data,
        })
    }

    /// Centre frequency of `bin` for a signal sampled at `sample_rate`.
    pub fn bin_frequency(&self, bin: usize, sample_rate: T) -> Option<T> {
        if self.bins < 2 {
            return None;
        }
        let window = T::from_usize(2 * (self.bins - 1))?;
        Some(T::from_usize(bin)? * sample_rate / window)
    }
}

/// Geometry shared by the serial and parallel paths.
struct Framing<T: Float> {
    window: Vec<T>,
    hop: usize,
    bins: usize,
}

impl<T: Float> Framing<T> {
    fn new(config: &StftConfig) -> Result<Self, FftError> {
        let hop = config.resolve_hop::<T>()?;
        let window = generate::<T>(config.window, config.window_size)?;
        Ok(Self {
            window,
            hop,
            bins: half_spectrum_len(config.window_size),
        })
    }

    fn windowed_frame(&self, signal: &[T], frame: usize) -> Vec<T> {
        let start = frame * self.hop;
        signal[start..start + self.window.len()]
            .iter()
            .zip(self.window.iter())
            .map(|(&s, &w)| s * w)
            .collect()
    }

    fn overlap_add(&self, frames: impl Iterator<Item = Vec<T>>, frame_total: usize) -> Vec<T> {
        let win_len = self.window.len();
        let len = output_len(frame_total, win_len, self.hop);
        let mut output = vec![T::zero(); len];
        let mut weight = vec![T::zero(); len];
        for (t, time) in frames.enumerate() {
            let start = t * self.hop;
            for j in 0..win_len {
                output[start + j] += time[j];
                weight[start + j] += self.window[j];
            }
        }
        for (out, &w) in output.iter_mut().zip(weight.iter()) {
            if w != T::zero() {
                *out = *out / w;
            }
        }
        output
    }
}

/// STFT and ISTFT, available on every [`RealFftImpl`].
pub trait StftImpl<T: Float>: RealFftImpl<T> {
    /// Spectrogram of `signal` framed according to `config`.
    fn stft_with(&self, signal: &[T], config: &StftConfig) -> Result<Spectrogram<T>, FftError> {
        let framing = Framing::<T>::new(config)?;
        let win_len = config.window_size;
        if signal.len() < win_len {
            return Err(FftError::InsufficientLength(signal.len()));
        }
        let frames = frame_count(signal.len(), win_len, framing.hop);
        crate::debug_log!(
            "stft: len={} window={} ({}) hop={} frames={}",
            signal.len(),
            win_len,
            config.window,
            framing.hop,
            frames
        );
        let mut spec = Grid::filled(framing.bins, frames, Complex::zero());
        for t in 0..frames {
            let frame = framing.windowed_frame(signal, t);
            let half = self.real_fft(&frame, T::one())?;
            if let Some(col) = spec.frame_mut(t) {
                col.copy_from_slice(&half);
            }
        }
        Ok(spec)
    }

    /// Overlap-add reconstruction of a spectrogram framed with `config`.
    fn istft_with(&self, spec: &Spectrogram<T>, config: &StftConfig) -> Result<Vec<T>, FftError> {
        let framing = Framing::<T>::new(config)?;
        if spec.bins() != framing.bins {
            return Err(FftError::InvalidLength(spec.bins()));
        }
        crate::debug_log!(
            "istft: frames={} window={} hop={}",
            spec.frames(),
            config.window_size,
            framing.hop
        );
        let mut times = Vec::with_capacity(spec.frames());
        for col in spec.iter_frames().take(spec.frames()) {
            times.push(self.real_ifft(col, T::one())?);
        }
        Ok(framing.overlap_add(times.into_iter(), spec.frames()))
    }

    /// Hamming-windowed STFT with the energy-derived hop.
    fn stft(&self, signal: &[T], window_size: usize) -> Result<Spectrogram<T>, FftError> {
        self.stft_with(signal, &StftConfig::new(window_size))
    }

    /// Inverse of [`StftImpl::stft`].
    fn istft(&self, spec: &Spectrogram<T>, window_size: usize) -> Result<Vec<T>, FftError> {
        self.istft_with(spec, &StftConfig::new(window_size))
    }
}

impl<T: Float, U: RealFftImpl<T> + ?Sized> StftImpl<T> for U {}

/// Spectrogram of `signal` using a fresh engine.
pub fn stft<T: Float>(signal: &[T], window_size: usize) -> Result<Spectrogram<T>, FftError> {
    FftEngine::<T>::default().stft(signal, window_size)
}

/// Signal reconstructed from `spec` using a fresh engine.
pub fn istft<T: Float>(spec: &Spectrogram<T>, window_size: usize) -> Result<Vec<T>, FftError> {
    FftEngine::<T>::default().istft(spec, window_size)
}

#[cfg(feature = "parallel")]
mod par {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use rayon::prelude::*;
    use std::sync::OnceLock;

    /// Frame count below which the parallel entry points stay serial.
    pub const DEFAULT_PARALLEL_STFT_THRESHOLD: usize = 4;

    static PARALLEL_STFT_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
    static PARALLEL_STFT_THRESHOLD_ENV: OnceLock<usize> = OnceLock::new();

    /// Override the minimum frame count for parallel STFT/ISTFT.
    ///
    /// Passing `0` reverts to `SPECTRA_STFT_PAR_THRESHOLD` or the default.
    pub fn set_parallel_stft_threshold(frames: usize) {
        PARALLEL_STFT_THRESHOLD_OVERRIDE.store(frames, Ordering::Relaxed);
    }

    /// Current minimum frame count for the parallel paths.
    pub fn parallel_stft_threshold() -> usize {
        let over = PARALLEL_STFT_THRESHOLD_OVERRIDE.load(Ordering::Relaxed);
        if over != 0 {
            return over;
        }
        *PARALLEL_STFT_THRESHOLD_ENV.get_or_init(|| {
            std::env::var("SPECTRA_STFT_PAR_THRESHOLD")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&v| v != 0)
                .unwrap_or(DEFAULT_PARALLEL_STFT_THRESHOLD)
        })
    }

    /// [`StftImpl::stft_with`] with frames transformed on the Rayon pool.
    ///
    /// Every worker owns its own [`FftEngine`]; columns are written
    /// independently.
    pub fn parallel<T: Float>(
        signal: &[T],
        config: &StftConfig,
    ) -> Result<Spectrogram<T>, FftError> {
        let framing = Framing::<T>::new(config)?;
        let win_len = config.window_size;
        if signal.len() < win_len {
            return Err(FftError::InsufficientLength(signal.len()));
        }
        let frames = frame_count(signal.len(), win_len, framing.hop);
        if frames < parallel_stft_threshold() {
            return FftEngine::<T>::default().stft_with(signal, config);
        }
        crate::debug_log!(
            "parallel stft: len={} window={} hop={} frames={}",
            signal.len(),
            win_len,
            framing.hop,
            frames
        );
        let mut spec = Grid::filled(framing.bins, frames, Complex::zero());
        spec.data
            .par_chunks_mut(framing.bins)
            .enumerate()
            .try_for_each_init(FftEngine::<T>::default, |engine, (t, col)| {
                let frame = framing.windowed_frame(signal, t);
                let half = engine.real_fft(&frame, T::one())?;
                col.copy_from_slice(&half);
                Ok(())
            })?;
        Ok(spec)
    }

    /// [`StftImpl::istft_with`] with per-frame inverse transforms on the
    /// Rayon pool. Overlap-add runs afterwards on the calling thread in
    /// frame order.
    pub fn inverse_parallel<T: Float>(
        spec: &Spectrogram<T>,
        config: &StftConfig,
    ) -> Result<Vec<T>, FftError> {
        let framing = Framing::<T>::new(config)?;
        if spec.bins() != framing.bins {
            return Err(FftError::InvalidLength(spec.bins()));
        }
        if spec.frames() < parallel_stft_threshold() {
            return FftEngine::<T>::default().istft_with(spec, config);
        }
        let times: Vec<Vec<T>> = spec
            .as_slice()
            .par_chunks(framing.bins)
            .map_init(FftEngine::<T>::default, |engine, col| {
                engine.real_ifft(col, T::one())
            })
            .collect::<Result<_, FftError>>()?;
        Ok(framing.overlap_add(times.into_iter(), spec.frames()))
    }
}

#[cfg(feature = "parallel")]
pub use par::{
    inverse_parallel, parallel, parallel_stft_threshold, set_parallel_stft_threshold,
    DEFAULT_PARALLEL_STFT_THRESHOLD,
};
