//! String-keyed hyperparameters and the algorithm registry.
//!
//! Experiments describe algorithms the way a command line would: a name
//! plus `key=value` pairs. [`AlgorithmParams`] holds the pairs and
//! [`build_algorithm`] turns a name and its parameters into a ready
//! [`SearchAlgorithm`] bound to a problem.
//!
//! Recognized keys:
//!
//! | Key | Type | Used by |
//! |-----|------|---------|
//! | `alpha` | number | randomized hill climbing |
//! | `T0`, `gamma` | number | simulated annealing |
//! | `t` | count | tabu search |
//! | `mu`, `lambda` | count | ES, GA |
//! | `sigma`, `sigma_decay` | number | ES |
//! | `mean_update` | `random` \| `best` \| `recombination` | ES |
//! | `pc`, `pm` | number | GA |
//! | `xover` | `onepoint` \| `uniform` \| `order` | GA |
//! | `mutation` | `bitflip` \| `uniform` \| `swap` | GA |
//! | `selection_population` | `random` \| `best` \| `roulette` \| `tournament` | GA |
//! | `k` | count | GA tournament |
//! | `cdf` | `fitness` \| `rank` | GA roulette |
//! | `S` | number | GA rank roulette |
//! | `replacement` | `comma` \| `plus` | GA |
//! | `seed` | count | all |
//!
//! Keys an algorithm does not use are ignored.

use crate::algorithm::SearchAlgorithm;
use crate::error::{Result, SearchError};
use crate::es::{EsConfig, EvolutionStrategy};
use crate::ga::{GaConfig, GeneticAlgorithm};
use crate::local_search::{LocalSearch, LocalSearchConfig};
use crate::problem::Problem;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A single hyperparameter value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    /// Non-negative integer, kept exact for seeds and counts.
    Integer(u64),
    Number(f64),
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Integer(v as u64)
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::Integer(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(v) => write!(f, "{v}"),
            ParamValue::Number(v) => write!(f, "{v}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// Named hyperparameters.
///
/// # Examples
///
/// ```
/// use u_metabench::params::AlgorithmParams;
///
/// let params: AlgorithmParams = "mu=5, lambda=20, xover=uniform".parse().unwrap();
/// assert_eq!(params.count("lambda").unwrap(), Some(20));
/// assert_eq!(params.text("xover").unwrap(), Some("uniform"));
/// assert!(params.number("xover").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmParams {
    values: HashMap<String, ParamValue>,
}

impl AlgorithmParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numeric value of `key`, if present.
    ///
    /// # Errors
    /// [`SearchError::Config`] if the value is text.
    pub fn number(&self, key: &str) -> Result<Option<f64>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Integer(v)) => Ok(Some(*v as f64)),
            Some(ParamValue::Number(v)) => Ok(Some(*v)),
            Some(ParamValue::Text(s)) => Err(SearchError::config(format!(
                "parameter '{key}' must be a number, got '{s}'"
            ))),
        }
    }

    /// Non-negative integer value of `key`, if present.
    ///
    /// # Errors
    /// [`SearchError::Config`] if the value is text, negative or fractional.
    pub fn count(&self, key: &str) -> Result<Option<usize>> {
        match self.integer(key)? {
            None => Ok(None),
            Some(v) => usize::try_from(v).map(Some).map_err(|_| {
                SearchError::config(format!("parameter '{key}' is out of range, got {v}"))
            }),
        }
    }

    /// Exact unsigned integer value of `key`, if present.
    ///
    /// # Errors
    /// [`SearchError::Config`] if the value is text, negative or fractional.
    pub fn integer(&self, key: &str) -> Result<Option<u64>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Integer(v)) => Ok(Some(*v)),
            Some(ParamValue::Number(v))
                if *v >= 0.0 && v.fract() == 0.0 && *v < u64::MAX as f64 =>
            {
                Ok(Some(*v as u64))
            }
            Some(ParamValue::Number(v)) => Err(SearchError::config(format!(
                "parameter '{key}' must be a non-negative integer, got {v}"
            ))),
            Some(ParamValue::Text(s)) => Err(SearchError::config(format!(
                "parameter '{key}' must be a non-negative integer, got '{s}'"
            ))),
        }
    }

    /// Text value of `key`, if present.
    ///
    /// # Errors
    /// [`SearchError::Config`] if the value is a number.
    pub fn text(&self, key: &str) -> Result<Option<&str>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Text(s)) => Ok(Some(s.as_str())),
            Some(v) => Err(SearchError::config(format!(
                "parameter '{key}' must be text, got {v}"
            ))),
        }
    }

    /// The `seed` key as an integer.
    pub fn seed(&self) -> Result<Option<u64>> {
        self.integer("seed")
    }
}

impl FromStr for AlgorithmParams {
    type Err = SearchError;

    /// Parses comma-separated `key=value` pairs. Unsigned integers become
    /// [`ParamValue::Integer`], other numbers [`ParamValue::Number`],
    /// everything else text.
    fn from_str(s: &str) -> Result<Self> {
        let mut params = AlgorithmParams::new();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                SearchError::config(format!("expected key=value, got '{pair}'"))
            })?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() {
                return Err(SearchError::config(format!("missing key in '{pair}'")));
            }
            if let Ok(v) = value.parse::<u64>() {
                params.set(key, v);
            } else if let Ok(v) = value.parse::<f64>() {
                params.set(key, v);
            } else {
                params.set(key, value);
            }
        }
        Ok(params)
    }
}

/// Every algorithm the registry can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmKind {
    RandomLs,
    HillClimbing,
    FirstImprovementHillClimbing,
    RandomizedHillClimbing,
    SimulatedAnnealing,
    Tabu,
    RandomEs,
    RandomGa,
    MuCommaLambdaGa,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 9] = [
        AlgorithmKind::RandomLs,
        AlgorithmKind::HillClimbing,
        AlgorithmKind::FirstImprovementHillClimbing,
        AlgorithmKind::RandomizedHillClimbing,
        AlgorithmKind::SimulatedAnnealing,
        AlgorithmKind::Tabu,
        AlgorithmKind::RandomEs,
        AlgorithmKind::RandomGa,
        AlgorithmKind::MuCommaLambdaGa,
    ];

    /// Registry key, accepted back by `FromStr`.
    pub fn key(self) -> &'static str {
        match self {
            AlgorithmKind::RandomLs => "random_ls",
            AlgorithmKind::HillClimbing => "hill_climbing",
            AlgorithmKind::FirstImprovementHillClimbing => "fi_hill_climbing",
            AlgorithmKind::RandomizedHillClimbing => "randomized_hill_climbing",
            AlgorithmKind::SimulatedAnnealing => "simulated_annealing",
            AlgorithmKind::Tabu => "tabu",
            AlgorithmKind::RandomEs => "random_es",
            AlgorithmKind::RandomGa => "random_ga",
            AlgorithmKind::MuCommaLambdaGa => "mu_comma_lambda_ga",
        }
    }

    fn local_search_preset(self) -> Option<LocalSearchConfig> {
        match self {
            AlgorithmKind::RandomLs => Some(LocalSearchConfig::random_walk()),
            AlgorithmKind::HillClimbing => Some(LocalSearchConfig::hill_climbing()),
            AlgorithmKind::FirstImprovementHillClimbing => {
                Some(LocalSearchConfig::first_improvement())
            }
            AlgorithmKind::RandomizedHillClimbing => {
                Some(LocalSearchConfig::randomized_hill_climbing())
            }
            AlgorithmKind::SimulatedAnnealing => Some(LocalSearchConfig::simulated_annealing()),
            AlgorithmKind::Tabu => Some(LocalSearchConfig::tabu()),
            AlgorithmKind::RandomEs | AlgorithmKind::RandomGa | AlgorithmKind::MuCommaLambdaGa => {
                None
            }
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "random_ls" | "randomls" => AlgorithmKind::RandomLs,
            "hill_climbing" | "hc" => AlgorithmKind::HillClimbing,
            "fi_hill_climbing" | "first_improvement" | "fihc" => {
                AlgorithmKind::FirstImprovementHillClimbing
            }
            "randomized_hill_climbing" | "rhc" => AlgorithmKind::RandomizedHillClimbing,
            "simulated_annealing" | "sa" => AlgorithmKind::SimulatedAnnealing,
            "tabu" => AlgorithmKind::Tabu,
            "random_es" | "es" => AlgorithmKind::RandomEs,
            "random_ga" => AlgorithmKind::RandomGa,
            "mu_comma_lambda_ga" | "ga" => AlgorithmKind::MuCommaLambdaGa,
            other => return Err(SearchError::config(format!("unknown algorithm '{other}'"))),
        };
        Ok(kind)
    }
}

/// Builds `kind` on `problem`, configured from `params`.
///
/// Construction performs initialization, so the returned algorithm already
/// holds an evaluated starting point.
///
/// # Errors
/// Configuration errors from `params`, and the construction errors of the
/// underlying algorithm (e.g. a GA on a real-valued problem).
///
/// # Examples
///
/// ```
/// use u_metabench::params::{build_algorithm, AlgorithmKind, AlgorithmParams};
/// use u_metabench::problem::{InstanceSize, Knapsack};
///
/// let mut problem = Knapsack::instance(InstanceSize::Small, 1000);
/// let params: AlgorithmParams = "T0=50,gamma=0.95,seed=1".parse().unwrap();
/// let mut sa = build_algorithm(AlgorithmKind::SimulatedAnnealing, &mut problem, &params).unwrap();
/// while !sa.step().unwrap() {}
/// assert!(sa.best_value() > 0.0);
/// ```
pub fn build_algorithm<'p, P: Problem + ?Sized>(
    kind: AlgorithmKind,
    problem: &'p mut P,
    params: &AlgorithmParams,
) -> Result<Box<dyn SearchAlgorithm + 'p>> {
    if let Some(preset) = kind.local_search_preset() {
        let config = preset.with_params(params)?;
        return Ok(Box::new(LocalSearch::new(problem, config)?));
    }
    match kind {
        AlgorithmKind::RandomEs => {
            let config = EsConfig::random_es().with_params(params)?;
            Ok(Box::new(EvolutionStrategy::new(problem, config)?))
        }
        AlgorithmKind::RandomGa => {
            let config = GaConfig::random_ga().with_params(params)?;
            Ok(Box::new(GeneticAlgorithm::new(problem, config)?))
        }
        _ => {
            let config = GaConfig::mu_comma_lambda().with_params(params)?;
            Ok(Box::new(GeneticAlgorithm::new(problem, config)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{
        BinaryFunction, BinaryFunctionKind, ContinuousFunction, ContinuousFunctionKind,
        InstanceSize, Knapsack, ProblemId,
    };

    #[test]
    fn test_parse() {
        let params: AlgorithmParams = " alpha = 0.3 ,selection_population=tournoi, k=3,".parse().unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params.number("alpha").unwrap(), Some(0.3));
        assert_eq!(params.text("selection_population").unwrap(), Some("tournoi"));
        assert_eq!(params.count("k").unwrap(), Some(3));
        assert_eq!(params.number("missing").unwrap(), None);
        assert!(AlgorithmParams::from_str("").unwrap().is_empty());
    }

    #[test]
    fn test_large_seed_is_exact() {
        let params: AlgorithmParams = "seed=1152921504606846977,pc=1".parse().unwrap();
        assert_eq!(params.get("seed"), Some(&ParamValue::Integer(1_152_921_504_606_846_977)));
        assert_eq!(params.seed().unwrap(), Some(1_152_921_504_606_846_977));
        assert_eq!(params.number("pc").unwrap(), Some(1.0));
        assert_eq!(AlgorithmParams::new().with("seed", 4.0).seed().unwrap(), Some(4));
        assert!(AlgorithmParams::new().with("seed", 4.5).seed().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(AlgorithmParams::from_str("mu").is_err());
        assert!(AlgorithmParams::from_str("=5").is_err());
    }

    #[test]
    fn test_wrong_types() {
        let params = AlgorithmParams::new()
            .with("mu", 2.5)
            .with("t", -1.0)
            .with("xover", 1.0)
            .with("pc", "high");
        assert!(params.count("mu").is_err());
        assert!(params.count("t").is_err());
        assert!(params.text("xover").is_err());
        assert!(params.number("pc").is_err());
    }

    #[test]
    fn test_algorithm_kind_round_trip() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.key().parse::<AlgorithmKind>().unwrap(), kind);
        }
        assert_eq!("SA".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::SimulatedAnnealing);
        assert!("nsga2".parse::<AlgorithmKind>().is_err());
    }

    #[test]
    fn test_build_local_search_with_params() {
        let mut problem = Knapsack::instance(InstanceSize::Small, 500);
        let params = AlgorithmParams::new().with("alpha", 0.1).with("seed", 3usize);
        let mut rhc =
            build_algorithm(AlgorithmKind::RandomizedHillClimbing, &mut problem, &params).unwrap();
        assert_eq!(rhc.name(), "RHillClimbing");
        rhc.step().unwrap();
        assert_eq!(rhc.record(1).get("alpha"), Some(0.1));
    }

    #[test]
    fn test_build_tabu_capacity() {
        let mut problem =
            BinaryFunction::instance(BinaryFunctionKind::OneMax, InstanceSize::Small, 500);
        let params = AlgorithmParams::new().with("t", 2usize).with("seed", 1usize);
        let mut tabu = build_algorithm(AlgorithmKind::Tabu, &mut problem, &params).unwrap();
        for i in 1..=5 {
            tabu.step().unwrap();
            assert!(tabu.record(i).get("tabu_size").unwrap() <= 2.0);
        }
    }

    #[test]
    fn test_build_every_algorithm_on_a_fitting_problem() {
        for kind in AlgorithmKind::ALL {
            let id = if kind == AlgorithmKind::RandomEs {
                ProblemId::Sphere
            } else {
                ProblemId::OneMax
            };
            let mut problem = id.build(InstanceSize::Small, 200).unwrap();
            let params = AlgorithmParams::new().with("seed", 5usize);
            let mut algo = build_algorithm(kind, problem.as_mut(), &params).unwrap();
            let mut steps = 0;
            while !algo.step().unwrap() && steps < 10_000 {
                steps += 1;
            }
            assert!(algo.best_value().is_finite(), "{kind}: no finite best");
        }
    }

    #[test]
    fn test_build_rejects_mismatch() {
        let mut sphere =
            ContinuousFunction::instance(ContinuousFunctionKind::Rosenbrock, InstanceSize::Small, 100);
        let params = AlgorithmParams::new();
        assert!(build_algorithm(AlgorithmKind::RandomGa, &mut sphere, &params).is_err());
        assert!(build_algorithm(AlgorithmKind::HillClimbing, &mut sphere, &params).is_err());

        let params = AlgorithmParams::new().with("selection_population", "elite");
        let mut onemax =
            BinaryFunction::instance(BinaryFunctionKind::OneMax, InstanceSize::Small, 100);
        assert!(matches!(
            build_algorithm(AlgorithmKind::MuCommaLambdaGa, &mut onemax, &params),
            Err(SearchError::Config(_))
        ));
    }
}
