//! Unit tests for the RNG module.
//!
//! This module contains tests verifying:
//! - Seed reproducibility per `(seed, path_index)`
//! - Independence of sibling path streams
//! - Draw indexing and iterator behaviour
//! - Distribution moments of the normal draws

use super::*;
use proptest::prelude::*;

/// Verifies that the same `(seed, path_index)` produces identical sequences.
#[test]
fn test_seed_reproducibility() {
    let mut s1 = DeterministicStream::new(12345, 7);
    let mut s2 = DeterministicStream::new(12345, 7);

    for _ in 0..1_000 {
        assert_eq!(s1.next_normal().to_bits(), s2.next_normal().to_bits());
    }
}

/// Verifies that sibling path streams under one seed differ.
#[test]
fn test_path_streams_independent() {
    let s0: Vec<f64> = DeterministicStream::new(42, 0)
        .take(64)
        .map(|d| d.value)
        .collect();
    let s1: Vec<f64> = DeterministicStream::new(42, 1)
        .take(64)
        .map(|d| d.value)
        .collect();

    assert_ne!(s0, s1);
    // Not a shifted copy of the sibling stream either
    assert_ne!(s0[1..], s1[..63]);
    assert_ne!(s1[1..], s0[..63]);
}

/// Verifies that different top-level seeds give different streams for the same path.
#[test]
fn test_different_seeds() {
    let mut a = DeterministicStream::new(1, 0);
    let mut b = DeterministicStream::new(2, 0);
    let differs = (0..16).any(|_| a.next_normal() != b.next_normal());
    assert!(differs);
}

/// Verifies draw indices are contiguous from zero.
#[test]
fn test_draw_indices() {
    let mut stream = DeterministicStream::new(3, 0);
    for expected in 0..10u64 {
        let draw = stream.next_draw();
        assert_eq!(draw.index, expected);
        assert!(draw.value.is_finite());
    }
    assert_eq!(stream.draws_taken(), 10);
}

/// Verifies that iterator, `next_draw` and `fill_normal` agree.
#[test]
fn test_access_paths_agree() {
    let from_iter: Vec<f64> = DeterministicStream::new(9, 4)
        .take(32)
        .map(|d| d.value)
        .collect();

    let mut buffer = vec![0.0; 32];
    let mut stream = DeterministicStream::new(9, 4);
    stream.fill_normal(&mut buffer);

    assert_eq!(from_iter, buffer);
    assert_eq!(stream.draws_taken(), 32);
}

/// Verifies that an empty buffer is handled gracefully.
#[test]
fn test_empty_buffer() {
    let mut stream = DeterministicStream::new(42, 0);
    let mut empty: Vec<f64> = vec![];
    stream.fill_normal(&mut empty);
    assert_eq!(stream.draws_taken(), 0);
}

/// Verifies the accessors report the construction parameters.
#[test]
fn test_accessors() {
    let stream = DeterministicStream::new(42, 5);
    assert_eq!(stream.seed(), 42);
    assert_eq!(stream.path_index(), 5);
    assert_eq!(stream.derived_seed(), derive_path_seed(42, 5));
}

/// Verifies a cloned stream continues the same sequence.
#[test]
fn test_clone_continues_sequence() {
    let mut original = DeterministicStream::new(77, 0);
    original.next_normal();
    let mut copy = original.clone();
    assert_eq!(original.next_normal(), copy.next_normal());
    assert_eq!(original.draws_taken(), copy.draws_taken());
}

/// Verifies sample mean and variance of normal draws.
#[test]
fn test_normal_moments() {
    let n = 200_000;
    let mut stream = DeterministicStream::new(2024, 0);
    let mut buffer = vec![0.0; n];
    stream.fill_normal(&mut buffer);

    let mean = buffer.iter().sum::<f64>() / n as f64;
    let var = buffer.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    assert!(mean.abs() < 0.01, "mean {} too far from 0", mean);
    assert!((var - 1.0).abs() < 0.02, "variance {} too far from 1", var);
}

/// Verifies that derived seeds do not collide for consecutive path indices.
#[test]
fn test_derived_seeds_distinct() {
    let mut seeds: Vec<u64> = (0..10_000).map(|i| derive_path_seed(42, i)).collect();
    seeds.sort_unstable();
    seeds.dedup();
    assert_eq!(seeds.len(), 10_000);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_distinct_paths_distinct_seeds(seed in any::<u64>(), a in any::<u64>(), b in any::<u64>()) {
        prop_assume!(a != b);
        prop_assert_ne!(derive_path_seed(seed, a), derive_path_seed(seed, b));
    }

    #[test]
    fn prop_stream_replay(seed in any::<u64>(), path in 0u64..1_000, n in 1usize..64) {
        let first: Vec<u64> = DeterministicStream::new(seed, path)
            .take(n)
            .map(|d| d.value.to_bits())
            .collect();
        let second: Vec<u64> = DeterministicStream::new(seed, path)
            .take(n)
            .map(|d| d.value.to_bits())
            .collect();
        prop_assert_eq!(first, second);
    }
}
