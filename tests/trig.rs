//! Trig table symmetry and cache behaviour.

use std::sync::Arc;

use spectra::{FftError, TrigTable, TrigTableCache};

const EPSILON: f64 = 1e-12;

#[test]
fn pythagorean_identity_holds() {
    for n in [4usize, 8, 12, 64, 1024] {
        let t = TrigTable::<f64>::new(n).unwrap();
        for k in 0..n as isize {
            let c = t.cos(k);
            let s = t.sin(k);
            assert!((c * c + s * s - 1.0).abs() < EPSILON, "n={} k={}", n, k);
        }
    }
}

#[test]
fn periodic_and_odd() {
    let n = 128isize;
    let t = TrigTable::<f64>::new(n as usize).unwrap();
    for k in -n..n {
        assert_eq!(t.cos(k), t.cos(k + n));
        assert_eq!(t.sin(k), t.sin(k + 3 * n));
        assert_eq!(t.sin(-k), -t.sin(k));
        assert_eq!(t.cos(-k), t.cos(k));
    }
}

#[test]
fn complex_is_unit_rotation() {
    let t = TrigTable::<f64>::new(16).unwrap();
    let w = t.complex(2);
    let expected = std::f64::consts::FRAC_1_SQRT_2;
    assert!((w.re - expected).abs() < EPSILON);
    assert!((w.im - expected).abs() < EPSILON);
    assert!((w.norm() - 1.0).abs() < EPSILON);
}

#[test]
fn rejects_sizes_not_multiple_of_four() {
    for n in [0usize, 1, 2, 6, 10] {
        assert_eq!(TrigTable::<f32>::new(n).unwrap_err(), FftError::InvalidSize(n));
    }
}

#[test]
fn lru_eviction() {
    let mut cache = TrigTableCache::<f64>::with_capacity(2);
    let first = cache.get(8).unwrap();
    cache.get(16).unwrap();
    cache.get(8).unwrap();
    cache.get(32).unwrap();
    assert!(cache.contains(8));
    assert!(!cache.contains(16));
    assert!(cache.contains(32));
    assert_eq!(cache.sizes().collect::<Vec<_>>(), vec![8, 32]);

    // an evicted table stays usable by whoever still holds it
    cache.get(64).unwrap();
    assert!(!cache.contains(8));
    assert_eq!(first.size(), 8);
    assert_eq!(Arc::strong_count(&first), 1);
}

#[test]
fn zero_capacity_is_clamped() {
    let mut cache = TrigTableCache::<f64>::with_capacity(0);
    assert_eq!(cache.capacity(), 1);
    cache.get(4).unwrap();
    cache.get(8).unwrap();
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}
