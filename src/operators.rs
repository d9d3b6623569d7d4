//! Generic sequence operators.
//!
//! Tweak, mutation and crossover building blocks for sequence-encoded
//! solutions (tours, move paths, words). They are domain-agnostic: the
//! problem adapters compose them into their neighborhood and crossover
//! functions.
//!
//! # Crossover Operators
//!
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order of a permutation
//! - [`column_shuffle_crossover`]: shuffles one aligned gene pair in `len` on average
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: Exchange two random positions, O(1)
//! - [`invert_mutation`]: Reverse a random segment (2-opt), O(n)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Order Crossover (OX) for permutations of distinct `usize` values.
///
/// Preserves the **relative order** of elements from both parents. The
/// values need not be `0..n`; any set of distinct values works as long as
/// both parents hold the same set.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]` from parent1
/// 2. Copy segment to child at the same positions
/// 3. Fill remaining positions with elements from parent2, in their original
///    order starting after the segment, skipping elements already present
///
/// # Panics
/// Panics if parents have different lengths.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (start, end) = random_segment(n, rng);

    let child1 = ox_build_child(parent1, parent2, start, end);
    let child2 = ox_build_child(parent2, parent1, start, end);

    (child1, child2)
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let bound = template.iter().copied().max().map_or(0, |m| m + 1);
    let mut child = template.to_vec();
    let mut in_segment = vec![false; bound];

    for &value in &template[start..=end] {
        in_segment[value] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let value = donor[(end + 1 + offset) % n];
        if !in_segment[value] {
            child[pos] = value;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Column-shuffle crossover for aligned sequences.
///
/// Walks the common prefix of both parents; each aligned pair of genes is
/// selected with probability `1 / min_len` and then shuffled, so it ends up
/// swapped between the children half of the time. Tails beyond the shorter
/// parent stay with their owner.
pub fn column_shuffle_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    let common = parent1.len().min(parent2.len());
    if common == 0 {
        return (child1, child2);
    }

    let p = 1.0 / common as f64;
    for i in 0..common {
        if rng.random_bool(p) && rng.random_bool(0.5) {
            std::mem::swap(&mut child1[i], &mut child2[i]);
        }
    }
    (child1, child2)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
pub fn swap_mutation<T, R: Rng>(seq: &mut [T], rng: &mut R) {
    let n = seq.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    seq.swap(i, j);
}

/// Invert mutation: reverse a random segment (2-opt move).
pub fn invert_mutation<T, R: Rng>(seq: &mut [T], rng: &mut R) {
    let n = seq.len();
    if n < 2 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    seq[start..=end].reverse();
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn same_elements(a: &[usize], b: &[usize]) -> bool {
        let sa: HashSet<usize> = a.iter().copied().collect();
        let sb: HashSet<usize> = b.iter().copied().collect();
        a.len() == b.len() && sa == sb && sa.len() == a.len()
    }

    // ---- OX Crossover ----

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];

        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert!(same_elements(&c1, &p1), "OX child1 not valid: {c1:?}");
            assert!(same_elements(&c2, &p1), "OX child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_ox_non_zero_based_values() {
        let mut rng = create_rng(5);
        let p1 = vec![3, 1, 4, 2, 5];
        let p2 = vec![5, 4, 3, 2, 1];

        for _ in 0..50 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert!(same_elements(&c1, &p1));
            assert!(same_elements(&c2, &p1));
        }
    }

    #[test]
    fn test_ox_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![2, 0, 3, 1];
        let (c1, c2) = order_crossover(&p, &p, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    fn test_ox_single_element() {
        let mut rng = create_rng(42);
        let (c1, c2) = order_crossover(&[4], &[4], &mut rng);
        assert_eq!(c1, vec![4]);
        assert_eq!(c2, vec![4]);
    }

    // ---- Column shuffle ----

    #[test]
    fn test_column_shuffle_preserves_columns() {
        let mut rng = create_rng(3);
        let p1 = vec!['a', 'b', 'c', 'd'];
        let p2 = vec!['w', 'x', 'y', 'z', 'q'];

        for _ in 0..50 {
            let (c1, c2) = column_shuffle_crossover(&p1, &p2, &mut rng);
            assert_eq!(c1.len(), 4);
            assert_eq!(c2.len(), 5);
            assert_eq!(c2[4], 'q');
            for i in 0..4 {
                let mut pair = [c1[i], c2[i]];
                pair.sort();
                let mut expected = [p1[i], p2[i]];
                expected.sort();
                assert_eq!(pair, expected);
            }
        }
    }

    #[test]
    fn test_column_shuffle_swaps_half_of_selected_pairs() {
        // A single column is always selected, then shuffled.
        let mut rng = create_rng(21);
        let trials = 4000;
        let swapped = (0..trials)
            .filter(|_| column_shuffle_crossover(&[0u8], &[1u8], &mut rng).0 == vec![1])
            .count();
        let rate = swapped as f64 / trials as f64;
        assert!((0.45..0.55).contains(&rate), "swap rate {rate}");
    }

    #[test]
    fn test_column_shuffle_empty_parent() {
        let mut rng = create_rng(3);
        let (c1, c2) = column_shuffle_crossover(&[] as &[u8], &[1, 2], &mut rng);
        assert!(c1.is_empty());
        assert_eq!(c2, vec![1, 2]);
    }

    // ---- Mutations ----

    #[test]
    fn test_swap_mutation_keeps_elements() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..10).collect();
        for _ in 0..100 {
            swap_mutation(&mut perm, &mut rng);
        }
        assert!(same_elements(&perm, &(0..10).collect::<Vec<_>>()));
    }

    #[test]
    fn test_swap_mutation_always_moves() {
        let mut rng = create_rng(9);
        for _ in 0..50 {
            let mut pair = vec![0, 1];
            swap_mutation(&mut pair, &mut rng);
            assert_eq!(pair, vec![1, 0]);
        }
    }

    #[test]
    fn test_invert_mutation_keeps_elements() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..10).collect();
        for _ in 0..100 {
            invert_mutation(&mut perm, &mut rng);
        }
        assert!(same_elements(&perm, &(0..10).collect::<Vec<_>>()));
    }

    #[test]
    fn test_mutations_on_tiny_inputs() {
        let mut rng = create_rng(42);
        let mut empty: Vec<u8> = vec![];
        swap_mutation(&mut empty, &mut rng);
        invert_mutation(&mut empty, &mut rng);
        let mut one = vec![7u8];
        swap_mutation(&mut one, &mut rng);
        invert_mutation(&mut one, &mut rng);
        assert_eq!(one, vec![7]);
    }
}
