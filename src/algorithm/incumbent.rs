//! Best-so-far tracking.

use crate::problem::Direction;
use crate::solution::Solution;

/// The best solution an algorithm has adopted during a run.
///
/// Holds its own clone: later edits to the solution that was offered never
/// leak into the incumbent.
#[derive(Debug, Clone)]
pub struct Incumbent {
    best: Solution,
    direction: Direction,
}

impl Incumbent {
    /// Starts from a clone of `initial`.
    pub fn new(initial: &Solution, direction: Direction) -> Self {
        Self {
            best: initial.clone(),
            direction,
        }
    }

    /// Replaces the incumbent by a clone of `candidate` if the candidate is
    /// at least as good (ties included). Returns `true` on replacement.
    pub fn offer(&mut self, candidate: &Solution) -> bool {
        if self.direction.better_solution(candidate, &self.best) {
            self.best = candidate.clone();
            true
        } else {
            false
        }
    }

    pub fn best(&self) -> &Solution {
        &self.best
    }

    pub fn value(&self) -> f64 {
        self.direction.value_of(&self.best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Encoding;

    fn valued(bits: Vec<bool>, value: f64) -> Solution {
        let mut s = Solution::binary(bits);
        s.set_value(value);
        s
    }

    #[test]
    fn test_offer_respects_direction() {
        let mut inc = Incumbent::new(&valued(vec![false], 5.0), Direction::Maximize);
        assert!(!inc.offer(&valued(vec![true], 3.0)));
        assert!(inc.offer(&valued(vec![true], 8.0)));
        assert_eq!(inc.value(), 8.0);

        let mut inc = Incumbent::new(&valued(vec![false], 5.0), Direction::Minimize);
        assert!(inc.offer(&valued(vec![true], 3.0)));
        assert!(!inc.offer(&valued(vec![false], 8.0)));
        assert_eq!(inc.value(), 3.0);
    }

    #[test]
    fn test_ties_replace() {
        let mut inc = Incumbent::new(&valued(vec![false], 5.0), Direction::Maximize);
        assert!(inc.offer(&valued(vec![true], 5.0)));
        assert_eq!(inc.best().as_bits(), Some(&[true][..]));
    }

    #[test]
    fn test_incumbent_does_not_alias() {
        let mut current = valued(vec![true, true], 2.0);
        let mut inc = Incumbent::new(&valued(vec![false, false], 0.0), Direction::Maximize);
        inc.offer(&current);
        if let Encoding::Binary(bits) = current.encoding_mut() {
            bits[0] = false;
        }
        assert_eq!(inc.best().as_bits(), Some(&[true, true][..]));
        assert_eq!(inc.value(), 2.0);
    }
}
