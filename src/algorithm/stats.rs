//! Population statistics.

use crate::solution::Solution;

/// Value statistics of a population, refreshed once per generation.
///
/// `min_ever` and `max_ever` span the whole run. Unevaluated members are
/// skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub min_ever: f64,
    pub max_ever: f64,
}

impl Default for PopulationStats {
    fn default() -> Self {
        Self {
            min: f64::NAN,
            max: f64::NAN,
            average: f64::NAN,
            min_ever: f64::INFINITY,
            max_ever: f64::NEG_INFINITY,
        }
    }
}

impl PopulationStats {
    /// Recomputes the current statistics from `population`.
    pub fn update(&mut self, population: &[Solution]) {
        let values: Vec<f64> = population.iter().filter_map(Solution::value).collect();
        if values.is_empty() {
            return;
        }
        self.min = values.iter().copied().fold(f64::INFINITY, f64::min);
        self.max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        self.average = values.iter().sum::<f64>() / values.len() as f64;
        self.min_ever = self.min_ever.min(self.min);
        self.max_ever = self.max_ever.max(self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(values: &[f64]) -> Vec<Solution> {
        values
            .iter()
            .map(|&v| {
                let mut s = Solution::real(vec![v]);
                s.set_value(v);
                s
            })
            .collect()
    }

    #[test]
    fn test_update() {
        let mut stats = PopulationStats::default();
        stats.update(&population(&[1.0, 2.0, 6.0]));
        assert_eq!((stats.min, stats.max, stats.average), (1.0, 6.0, 3.0));

        stats.update(&population(&[3.0, 4.0]));
        assert_eq!((stats.min, stats.max), (3.0, 4.0));
        assert_eq!((stats.min_ever, stats.max_ever), (1.0, 6.0));
    }

    #[test]
    fn test_unevaluated_skipped() {
        let mut stats = PopulationStats::default();
        let mut pop = population(&[2.0]);
        pop.push(Solution::real(vec![9.0]));
        stats.update(&pop);
        assert_eq!(stats.max, 2.0);
    }
}
