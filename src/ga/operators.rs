//! Variation operators.
//!
//! The free functions work on raw gene slices; [`Crossover`] and
//! [`Mutation`] dispatch them on [`Solution`]s after checking the encoding.
//!
//! # Crossover Operators
//!
//! - [`one_point_crossover`]: swap tails after a random cut
//! - [`uniform_crossover`]: each gene from either parent with probability 1/2
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: flip exactly one bit
//! - [`uniform_mutation`]: flip each bit with probability 1/n
//! - [`swap_mutation`]: exchange two distinct positions
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::error::{Result, SearchError};
use crate::solution::{Encoding, Solution, SolutionKind};
use rand::seq::index;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// One-point crossover.
///
/// Draws a cut in `[0, n)` and swaps the tails: child 1 is
/// `parent1[..cut] ++ parent2[cut..]`, child 2 the mirror image.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn one_point_crossover<T: Clone, R: Rng + ?Sized>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let cut = rng.random_range(0..n);
    let mut child1 = parent1[..cut].to_vec();
    child1.extend_from_slice(&parent2[cut..]);
    let mut child2 = parent2[..cut].to_vec();
    child2.extend_from_slice(&parent1[cut..]);
    (child1, child2)
}

/// Uniform crossover: a copy of `parent1` where each gene is taken from
/// `parent2` with probability 1/2. Produces a single child.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<T: Clone, R: Rng + ?Sized>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> Vec<T> {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    parent1
        .iter()
        .zip(parent2)
        .map(|(a, b)| if rng.random_bool(0.5) { b.clone() } else { a.clone() })
        .collect()
}

/// Order Crossover (OX) for permutations.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]` from parent1
/// 2. Copy segment to child at the same positions
/// 3. Fill remaining positions with elements from parent2, in their original
///    order starting after the segment, skipping elements already present
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn order_crossover<R: Rng + ?Sized>(
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
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    // wrap around from just after the segment
    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !in_segment[val] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Flips exactly one uniformly chosen bit.
pub fn bit_flip_mutation<R: Rng + ?Sized>(bits: &mut [bool], rng: &mut R) {
    if bits.is_empty() {
        return;
    }
    let i = rng.random_range(0..bits.len());
    bits[i] = !bits[i];
}

/// Flips each bit independently with probability `1/n`.
pub fn uniform_mutation<R: Rng + ?Sized>(bits: &mut [bool], rng: &mut R) {
    let p = 1.0 / bits.len().max(1) as f64;
    for bit in bits.iter_mut() {
        if rng.random_bool(p) {
            *bit = !*bit;
        }
    }
}

/// Exchanges two distinct random positions.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<T, R: Rng + ?Sized>(genes: &mut [T], rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let pair = index::sample(rng, n, 2);
    genes.swap(pair.index(0), pair.index(1));
}

// ============================================================================
// Solution-level dispatch
// ============================================================================

/// Crossover operator applied to a pair of parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// [`one_point_crossover`], two children. Binary only.
    OnePoint,
    /// [`uniform_crossover`], one child. Binary only.
    Uniform,
    /// [`order_crossover`], two children. Permutation only.
    Order,
}

impl Crossover {
    /// Encoding this operator works on.
    pub fn kind(self) -> SolutionKind {
        match self {
            Crossover::OnePoint | Crossover::Uniform => SolutionKind::Binary,
            Crossover::Order => SolutionKind::Permutation,
        }
    }

    /// Recombines two parents into one or two unevaluated children.
    ///
    /// # Errors
    /// [`SearchError::TypeMismatch`] if a parent has the wrong encoding,
    /// [`SearchError::DimensionMismatch`] if the parents differ in length.
    pub fn apply<R: Rng + ?Sized>(
        self,
        parent1: &Solution,
        parent2: &Solution,
        rng: &mut R,
    ) -> Result<Vec<Solution>> {
        if parent1.dimension() != parent2.dimension() {
            return Err(SearchError::DimensionMismatch {
                expected: parent1.dimension(),
                found: parent2.dimension(),
            });
        }
        match (self, parent1.encoding(), parent2.encoding()) {
            (Crossover::OnePoint, Encoding::Binary(a), Encoding::Binary(b)) => {
                let (c1, c2) = one_point_crossover(a, b, rng);
                Ok(vec![Solution::binary(c1), Solution::binary(c2)])
            }
            (Crossover::Uniform, Encoding::Binary(a), Encoding::Binary(b)) => {
                Ok(vec![Solution::binary(uniform_crossover(a, b, rng))])
            }
            (Crossover::Order, Encoding::Permutation(a), Encoding::Permutation(b)) => {
                let (c1, c2) = order_crossover(a, b, rng);
                Ok(vec![
                    Solution::new(Encoding::Permutation(c1)),
                    Solution::new(Encoding::Permutation(c2)),
                ])
            }
            _ => Err(SearchError::TypeMismatch {
                expected: self.kind(),
                found: if parent1.kind() == self.kind() {
                    parent2.kind()
                } else {
                    parent1.kind()
                },
            }),
        }
    }
}

/// Mutation operator applied in place to one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// [`bit_flip_mutation`]. Binary only.
    BitFlip,
    /// [`uniform_mutation`]. Binary only.
    Uniform,
    /// [`swap_mutation`]. Permutation only.
    Swap,
}

impl Mutation {
    /// Encoding this operator works on.
    pub fn kind(self) -> SolutionKind {
        match self {
            Mutation::BitFlip | Mutation::Uniform => SolutionKind::Binary,
            Mutation::Swap => SolutionKind::Permutation,
        }
    }

    /// Mutates `solution` in place, clearing its cached value.
    ///
    /// # Errors
    /// [`SearchError::TypeMismatch`] if the solution has the wrong encoding.
    pub fn apply<R: Rng + ?Sized>(self, solution: &mut Solution, rng: &mut R) -> Result<()> {
        if solution.kind() != self.kind() {
            return Err(SearchError::TypeMismatch {
                expected: self.kind(),
                found: solution.kind(),
            });
        }
        match (self, solution.encoding_mut()) {
            (Mutation::BitFlip, Encoding::Binary(bits)) => bit_flip_mutation(bits, rng),
            (Mutation::Uniform, Encoding::Binary(bits)) => uniform_mutation(bits, rng),
            (Mutation::Swap, Encoding::Permutation(order)) => swap_mutation(order, rng),
            _ => {}
        }
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
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
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Check that a slice is a valid permutation of 0..n.
    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        if perm.len() != n {
            return false;
        }
        let set: HashSet<usize> = perm.iter().copied().collect();
        set.len() == n && perm.iter().all(|&v| v < n)
    }

    // ---- One-point ----

    #[test]
    fn test_one_point_swaps_tails() {
        let mut rng = create_rng(42);
        let p1 = vec![true; 8];
        let p2 = vec![false; 8];
        for _ in 0..100 {
            let (c1, c2) = one_point_crossover(&p1, &p2, &mut rng);
            let cut = c1.iter().take_while(|&&b| b).count();
            assert!(c1[cut..].iter().all(|&b| !b), "child1 {c1:?} is not head/tail");
            assert!(c2[..cut].iter().all(|&b| !b));
            assert!(c2[cut..].iter().all(|&b| b));
            assert!(cut < 8, "cut is drawn in [0, n)");
        }
    }

    // ---- Uniform ----

    #[test]
    fn test_uniform_takes_genes_from_parents() {
        let mut rng = create_rng(7);
        let p1 = vec![true, true, false, false];
        let p2 = vec![true, false, true, false];
        for _ in 0..50 {
            let child = uniform_crossover(&p1, &p2, &mut rng);
            assert!(child[0], "agreeing genes are kept");
            assert!(!child[3]);
        }
    }

    // ---- OX ----

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];

        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert!(is_valid_permutation(&c1, 8), "OX child1 not valid: {c1:?}");
            assert!(is_valid_permutation(&c2, 8), "OX child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_ox_single_element() {
        let mut rng = create_rng(42);
        let (c1, c2) = order_crossover(&[0], &[0], &mut rng);
        assert_eq!(c1, vec![0]);
        assert_eq!(c2, vec![0]);
    }

    #[test]
    fn test_ox_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![3, 1, 4, 0, 2];
        for _ in 0..20 {
            let (c1, c2) = order_crossover(&p, &p, &mut rng);
            assert_eq!(c1, p);
            assert_eq!(c2, p);
        }
    }

    // ---- Mutation ----

    #[test]
    fn test_bit_flip_changes_exactly_one_bit() {
        let mut rng = create_rng(3);
        for _ in 0..100 {
            let mut bits = vec![false; 12];
            bit_flip_mutation(&mut bits, &mut rng);
            assert_eq!(bits.iter().filter(|&&b| b).count(), 1);
        }
    }

    #[test]
    fn test_uniform_mutation_rate() {
        let mut rng = create_rng(5);
        let n = 50;
        let trials = 2000;
        let mut flips = 0;
        for _ in 0..trials {
            let mut bits = vec![false; n];
            uniform_mutation(&mut bits, &mut rng);
            flips += bits.iter().filter(|&&b| b).count();
        }
        let mean = flips as f64 / trials as f64;
        assert!((mean - 1.0).abs() < 0.15, "expected about one flip per call, got {mean}");
    }

    #[test]
    fn test_swap_changes_two_positions() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut perm: Vec<usize> = (0..10).collect();
            swap_mutation(&mut perm, &mut rng);
            assert!(is_valid_permutation(&perm, 10));
            let moved = perm.iter().enumerate().filter(|(i, &v)| *i != v).count();
            assert_eq!(moved, 2);
        }
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        swap_mutation(&mut perm, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    // ---- Dispatch ----

    #[test]
    fn test_dispatch_child_counts() {
        let mut rng = create_rng(1);
        let a = Solution::binary(vec![true, false, true]);
        let b = Solution::binary(vec![false, false, true]);
        assert_eq!(Crossover::OnePoint.apply(&a, &b, &mut rng).unwrap().len(), 2);
        assert_eq!(Crossover::Uniform.apply(&a, &b, &mut rng).unwrap().len(), 1);

        let p = Solution::permutation(vec![2, 0, 1]).unwrap();
        let q = Solution::permutation(vec![0, 1, 2]).unwrap();
        let children = Crossover::Order.apply(&p, &q, &mut rng).unwrap();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| !c.is_evaluated()));
    }

    #[test]
    fn test_dispatch_type_mismatch() {
        let mut rng = create_rng(1);
        let bits = Solution::binary(vec![true, false, true]);
        let perm = Solution::permutation(vec![2, 0, 1]).unwrap();
        assert_eq!(
            Crossover::Order.apply(&bits, &bits, &mut rng),
            Err(SearchError::TypeMismatch {
                expected: SolutionKind::Permutation,
                found: SolutionKind::Binary
            })
        );
        assert!(Crossover::OnePoint.apply(&bits, &perm, &mut rng).is_err());

        let mut p = perm.clone();
        assert!(matches!(
            Mutation::BitFlip.apply(&mut p, &mut rng),
            Err(SearchError::TypeMismatch { .. })
        ));
        assert_eq!(p, perm, "rejected mutation leaves the solution untouched");
    }

    #[test]
    fn test_mutation_clears_value() {
        let mut rng = create_rng(1);
        let mut s = Solution::binary(vec![false; 4]);
        s.set_value(0.0);
        Mutation::BitFlip.apply(&mut s, &mut rng).unwrap();
        assert!(!s.is_evaluated());
    }

    proptest! {
        #[test]
        fn prop_ox_children_are_permutations(n in 1usize..30, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let mut p1: Vec<usize> = (0..n).collect();
            let mut p2: Vec<usize> = (0..n).collect();
            crate::random::shuffle(&mut p1, &mut rng);
            crate::random::shuffle(&mut p2, &mut rng);
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            prop_assert!(is_valid_permutation(&c1, n));
            prop_assert!(is_valid_permutation(&c2, n));
        }
    }
}
