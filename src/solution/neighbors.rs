//! One-move neighborhoods.
//!
//! - binary: flip exactly one bit, `n` neighbors
//! - permutation: swap exactly one pair of positions, `n(n-1)/2` neighbors
//! - real: no neighborhood
//!
//! The list is shuffled so that scanning it in order does not favour
//! low indices.

use super::types::{Encoding, Solution};
use crate::error::{Result, SearchError};
use rand::Rng;

impl Solution {
    /// Generates every solution one elementary move away, in random order.
    ///
    /// Neighbors are unevaluated.
    ///
    /// # Errors
    /// [`SearchError::Unsupported`] for real-valued solutions.
    pub fn neighbors<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Solution>> {
        let mut neighbors = match self.encoding() {
            Encoding::Binary(bits) => bit_flip_neighbors(bits),
            Encoding::Permutation(order) => swap_neighbors(order),
            Encoding::Real(_) => {
                return Err(SearchError::Unsupported(
                    "a real-valued solution has no neighborhood".into(),
                ))
            }
        };
        crate::random::shuffle(&mut neighbors, rng);
        Ok(neighbors)
    }
}

fn bit_flip_neighbors(bits: &[bool]) -> Vec<Solution> {
    (0..bits.len())
        .map(|i| {
            let mut flipped = bits.to_vec();
            flipped[i] = !flipped[i];
            Solution::binary(flipped)
        })
        .collect()
}

fn swap_neighbors(order: &[usize]) -> Vec<Solution> {
    let n = order.len();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let mut swapped = order.to_vec();
            swapped.swap(i, j);
            out.push(Solution::new(Encoding::Permutation(swapped)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::solution::SolutionKind;
    use proptest::prelude::*;

    fn hamming(a: &[bool], b: &[bool]) -> usize {
        a.iter().zip(b).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_binary_neighbors() {
        let mut rng = create_rng(1);
        let s = Solution::binary(vec![true, false, false, true, true]);
        let neighbors = s.neighbors(&mut rng).unwrap();
        assert_eq!(neighbors.len(), 5);
        for n in &neighbors {
            assert_eq!(hamming(n.as_bits().unwrap(), s.as_bits().unwrap()), 1);
            assert!(!n.is_evaluated());
        }
        for i in 0..neighbors.len() {
            for j in (i + 1)..neighbors.len() {
                assert_ne!(neighbors[i], neighbors[j]);
            }
        }
    }

    #[test]
    fn test_permutation_neighbors() {
        let mut rng = create_rng(2);
        let s = Solution::permutation(vec![3, 1, 0, 2]).unwrap();
        let neighbors = s.neighbors(&mut rng).unwrap();
        assert_eq!(neighbors.len(), 6);
        for n in &neighbors {
            let diff = n
                .as_permutation()
                .unwrap()
                .iter()
                .zip(s.as_permutation().unwrap())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(diff, 2, "one swap changes exactly two positions");
        }
        for i in 0..neighbors.len() {
            for j in (i + 1)..neighbors.len() {
                assert_ne!(neighbors[i], neighbors[j]);
            }
        }
    }

    #[test]
    fn test_real_neighbors_unsupported() {
        let mut rng = create_rng(3);
        let s = Solution::real(vec![0.5, 1.5]);
        assert!(matches!(
            s.neighbors(&mut rng),
            Err(SearchError::Unsupported(_))
        ));
    }

    #[test]
    fn test_neighbor_order_varies() {
        let s = Solution::empty(SolutionKind::Binary, 30);
        let mut rng = create_rng(4);
        let first = s.neighbors(&mut rng).unwrap();
        let second = s.neighbors(&mut rng).unwrap();
        assert_ne!(first, second, "two shuffles of 30 items should differ");
    }

    proptest! {
        #[test]
        fn prop_neighbor_counts(n in 1usize..25, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let bin = Solution::empty(SolutionKind::Binary, n).random(&mut rng);
            prop_assert_eq!(bin.neighbors(&mut rng).unwrap().len(), n);

            let perm = Solution::empty(SolutionKind::Permutation, n).random(&mut rng);
            prop_assert_eq!(perm.neighbors(&mut rng).unwrap().len(), n * (n - 1) / 2);
        }
    }
}
