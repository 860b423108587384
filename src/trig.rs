//! Quarter-wave sine tables and the LRU cache that hands them out.
//!
//! A [`TrigTable`] for transform size `n` stores `n/4 + 1` samples of
//! `sin(2πi/n)` and derives cosine and sine at any integer rotation index by
//! quadrant symmetry. Tables are immutable once built and shared through
//! [`Arc`], so an engine can keep using a table after the cache evicted it.

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::fft::FftError;
use crate::num::{Complex, Float};

/// Number of tables retained by [`TrigTableCache::default`].
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Sine/cosine lookup for rotation indices of a size-`n` transform.
///
/// `cos(k)` and `sin(k)` return `cos(2πk/n)` and `sin(2πk/n)` for any `k`,
/// including negative indices and indices past `n`.
#[derive(Debug, Clone)]
pub struct TrigTable<T: Float> {
    size: usize,
    quarter: usize,
    table: Vec<T>,
}

impl<T: Float> TrigTable<T> {
    /// Build the quarter-wave table for `size`.
    ///
    /// `size` must be a positive multiple of 4.
    pub fn new(size: usize) -> Result<Self, FftError> {
        if size == 0 || size % 4 != 0 {
            return Err(FftError::InvalidSize(size));
        }
        let size_t = T::from_usize(size).ok_or(FftError::InvalidSize(size))?;
        let quarter = size / 4;
        let step = T::from_f64(2.0) * T::pi() / size_t;
        let mut table = Vec::with_capacity(quarter + 1);
        table.push(T::zero());
        for i in 1..quarter {
            let i_t = T::from_usize(i).ok_or(FftError::InvalidSize(size))?;
            table.push((step * i_t).sin());
        }
        // Exact endpoints keep cos(0) == 1 and sin(n/4) == 1 bit-for-bit.
        table.push(T::one());
        Ok(Self {
            size,
            quarter,
            table,
        })
    }

    /// Transform size this table serves.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored sine samples (`size/4 + 1`).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[inline]
    fn wrap(&self, index: isize) -> usize {
        // rem_euclid always lands in [0, size)
        index.rem_euclid(self.size as isize) as usize
    }

    /// `cos(2π·index/size)`
    #[inline]
    pub fn cos(&self, index: isize) -> T {
        let i = self.wrap(index);
        let q = self.quarter;
        if i < q {
            self.table[q - i]
        } else if i < 2 * q {
            -self.table[i - q]
        } else if i < 3 * q {
            -self.table[3 * q - i]
        } else {
            self.table[i - 3 * q]
        }
    }

    /// `sin(2π·index/size)`
    #[inline]
    pub fn sin(&self, index: isize) -> T {
        let i = self.wrap(index);
        let q = self.quarter;
        if i < q {
            self.table[i]
        } else if i < 2 * q {
            self.table[2 * q - i]
        } else if i < 3 * q {
            -self.table[i - 2 * q]
        } else {
            -self.table[self.size - i]
        }
    }

    /// `e^{2πi·index/size}`
    #[inline]
    pub fn complex(&self, index: isize) -> Complex<T> {
        Complex::new(self.cos(index), self.sin(index))
    }
}

/// Bounded cache of [`TrigTable`]s keyed by transform size.
///
/// Lookups move the entry to the most-recently-used end; inserting into a
/// full cache evicts the least-recently-used table.
pub struct TrigTableCache<T: Float> {
    tables: HashMap<usize, Arc<TrigTable<T>>>,
    /// LRU order, least recent at the front.
    order: VecDeque<usize>,
    capacity: usize,
}

impl<T: Float> Default for TrigTableCache<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl<T: Float> TrigTableCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding at most `capacity` tables (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tables: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Retrieve or build the table for `size`.
    pub fn get(&mut self, size: usize) -> Result<Arc<TrigTable<T>>, FftError> {
        if let Some(table) = self.tables.get(&size) {
            let table = Arc::clone(table);
            self.touch(size);
            return Ok(table);
        }
        let table = Arc::new(TrigTable::new(size)?);
        if self.tables.len() >= self.capacity {
            if let Some(old) = self.order.pop_front() {
                self.tables.remove(&old);
                crate::debug_log!("trig table cache evicted size {}", old);
            }
        }
        crate::debug_log!("trig table built for size {}", size);
        self.tables.insert(size, Arc::clone(&table));
        self.order.push_back(size);
        Ok(table)
    }

    fn touch(&mut self, size: usize) {
        if self.order.back() == Some(&size) {
            return;
        }
        self.order.retain(|&s| s != size);
        self.order.push_back(size);
    }

    /// Whether a table for `size` is currently cached.
    pub fn contains(&self, size: usize) -> bool {
        self.tables.contains_key(&size)
    }

    /// Cached sizes from least to most recently used.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.tables.clear();
        self.order.clear();
    }
}
