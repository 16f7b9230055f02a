//! Tabu list.

use crate::solution::Solution;
use std::collections::VecDeque;

/// Fixed-capacity FIFO of recently accepted solutions.
///
/// Membership compares encodings, so a freshly generated neighbor equal to
/// a listed solution is tabu.
#[derive(Debug, Clone)]
pub struct TabuList {
    capacity: usize,
    entries: VecDeque<Solution>,
}

impl TabuList {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, solution: &Solution) -> bool {
        self.entries.iter().any(|s| s == solution)
    }

    /// Appends a solution, evicting the oldest entry when full.
    pub fn push(&mut self, solution: Solution) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(solution);
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(i: usize) -> Solution {
        Solution::binary((0..8).map(|b| i & (1 << b) != 0).collect())
    }

    #[test]
    fn test_eviction_after_capacity_plus_one() {
        let t = 4;
        let mut list = TabuList::new(t);
        list.push(bits(0));
        for i in 1..t {
            list.push(bits(i));
        }
        assert_eq!(list.len(), t);
        assert!(list.contains(&bits(0)), "still tabu after {t} acceptances");

        list.push(bits(t));
        assert!(!list.contains(&bits(0)), "evicted after {} acceptances", t + 1);
        assert!(list.contains(&bits(1)));
        assert_eq!(list.len(), t);
    }

    #[test]
    fn test_membership_ignores_value() {
        let mut list = TabuList::new(2);
        let mut s = bits(3);
        s.set_value(9.0);
        list.push(s);
        assert!(list.contains(&bits(3)));
        assert!(!list.contains(&bits(4)));
    }

    #[test]
    fn test_fifo_order() {
        let mut list = TabuList::new(2);
        for i in 0..5 {
            list.push(bits(i));
        }
        let order: Vec<&Solution> = list.iter().collect();
        assert_eq!(order, vec![&bits(3), &bits(4)]);
    }
}
