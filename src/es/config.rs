//! Evolution strategy configuration.

use crate::error::{Result, SearchError};
use crate::params::AlgorithmParams;

/// How σ evolves between generations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepSizeRule {
    /// σ never changes.
    Constant,
    /// `σ_{k+1} = factor * σ_k` after every generation.
    Geometric {
        /// Positive multiplier, typically slightly below 1.
        factor: f64,
    },
}

/// How the mean moves after a generation has been sampled and evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeanUpdate {
    /// A uniformly chosen sample replaces the mean if at least as good.
    RandomSample,
    /// The best sample replaces the mean if at least as good.
    BestSample,
    /// The mean becomes the centroid of the best µ samples, unconditionally.
    /// The centroid costs one extra evaluation.
    Recombination,
}

/// Configuration of an [`EvolutionStrategy`](super::EvolutionStrategy).
///
/// # Examples
///
/// ```
/// use u_metabench::es::{EsConfig, MeanUpdate, StepSizeRule};
///
/// let config = EsConfig::default()
///     .with_lambda(20)
///     .with_mean_update(MeanUpdate::Recombination)
///     .with_step_size(StepSizeRule::Geometric { factor: 0.98 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EsConfig {
    /// Parents recombined by [`MeanUpdate::Recombination`].
    pub mu: usize,
    /// Samples per generation.
    pub lambda: usize,
    /// Initial mutation strength.
    pub sigma: f64,
    pub step_size: StepSizeRule,
    pub mean_update: MeanUpdate,
    pub seed: Option<u64>,
}

impl Default for EsConfig {
    fn default() -> Self {
        Self {
            mu: 5,
            lambda: 10,
            sigma: 1.0,
            step_size: StepSizeRule::Constant,
            mean_update: MeanUpdate::RandomSample,
            seed: None,
        }
    }
}

impl EsConfig {
    /// RandomES: µ = 5, λ = 10, σ = 1, random sample mean update.
    pub fn random_es() -> Self {
        Self::default()
    }

    /// (1, λ)-style elitist strategy following the best sample.
    pub fn best_sample_es() -> Self {
        Self {
            mean_update: MeanUpdate::BestSample,
            ..Self::default()
        }
    }

    /// (µ/µ, λ) intermediate recombination.
    pub fn recombination_es() -> Self {
        Self {
            mean_update: MeanUpdate::Recombination,
            ..Self::default()
        }
    }

    /// Default configuration overridden by the keys present in `params`.
    pub fn from_params(params: &AlgorithmParams) -> Result<Self> {
        Self::default().with_params(params)
    }

    /// Overrides fields from `mu`, `lambda`, `sigma`, `sigma_decay`,
    /// `mean_update` and `seed`.
    pub fn with_params(mut self, params: &AlgorithmParams) -> Result<Self> {
        if let Some(mu) = params.count("mu")? {
            self.mu = mu;
        }
        if let Some(lambda) = params.count("lambda")? {
            self.lambda = lambda;
        }
        if let Some(sigma) = params.number("sigma")? {
            self.sigma = sigma;
        }
        if let Some(factor) = params.number("sigma_decay")? {
            self.step_size = if factor == 1.0 {
                StepSizeRule::Constant
            } else {
                StepSizeRule::Geometric { factor }
            };
        }
        if let Some(update) = params.text("mean_update")? {
            self.mean_update = match update {
                "random" => MeanUpdate::RandomSample,
                "best" => MeanUpdate::BestSample,
                "recombination" | "centroid" => MeanUpdate::Recombination,
                other => {
                    return Err(SearchError::config(format!(
                        "unknown mean update '{other}' (random, best, recombination)"
                    )))
                }
            };
        }
        if let Some(seed) = params.seed()? {
            self.seed = Some(seed);
        }
        Ok(self)
    }

    pub fn with_mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_step_size(mut self, rule: StepSizeRule) -> Self {
        self.step_size = rule;
        self
    }

    pub fn with_mean_update(mut self, update: MeanUpdate) -> Self {
        self.mean_update = update;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Display name of the variant.
    pub fn name(&self) -> String {
        match self.mean_update {
            MeanUpdate::RandomSample => "RandomES".to_string(),
            MeanUpdate::BestSample => "BestES".to_string(),
            MeanUpdate::Recombination => format!("({0}/{0},{1})-ES", self.mu, self.lambda),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.lambda == 0 {
            return Err(SearchError::config("lambda must be at least 1"));
        }
        if self.mu == 0 {
            return Err(SearchError::config("mu must be at least 1"));
        }
        if self.mean_update == MeanUpdate::Recombination && self.mu > self.lambda {
            return Err(SearchError::config(format!(
                "recombination needs mu <= lambda, got mu={} lambda={}",
                self.mu, self.lambda
            )));
        }
        if !(self.sigma > 0.0 && self.sigma.is_finite()) {
            return Err(SearchError::config(format!(
                "sigma must be positive, got {}",
                self.sigma
            )));
        }
        if let StepSizeRule::Geometric { factor } = self.step_size {
            if !(factor > 0.0 && factor.is_finite()) {
                return Err(SearchError::config(format!(
                    "sigma decay factor must be positive, got {factor}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EsConfig::default();
        assert_eq!(config.mu, 5);
        assert_eq!(config.lambda, 10);
        assert!((config.sigma - 1.0).abs() < 1e-12);
        assert_eq!(config.mean_update, MeanUpdate::RandomSample);
        assert_eq!(config.name(), "RandomES");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_recombination_name() {
        assert_eq!(EsConfig::recombination_es().name(), "(5/5,10)-ES");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(EsConfig::default().with_lambda(0).validate().is_err());
        assert!(EsConfig::default().with_sigma(0.0).validate().is_err());
        assert!(EsConfig::default().with_sigma(f64::NAN).validate().is_err());
        assert!(EsConfig::recombination_es().with_mu(11).validate().is_err());
        assert!(EsConfig::default()
            .with_step_size(StepSizeRule::Geometric { factor: -0.5 })
            .validate()
            .is_err());
        // mu is only bounded by lambda when it is used
        assert!(EsConfig::best_sample_es().with_mu(11).validate().is_ok());
    }

    #[test]
    fn test_from_params() {
        let params: AlgorithmParams = "mu=3,lambda=12,sigma=0.5,sigma_decay=0.9,mean_update=recombination,seed=4"
            .parse()
            .unwrap();
        let config = EsConfig::from_params(&params).unwrap();
        assert_eq!(config.mu, 3);
        assert_eq!(config.lambda, 12);
        assert!((config.sigma - 0.5).abs() < 1e-12);
        assert_eq!(config.step_size, StepSizeRule::Geometric { factor: 0.9 });
        assert_eq!(config.mean_update, MeanUpdate::Recombination);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn test_from_params_unknown_mean_update() {
        let params: AlgorithmParams = "mean_update=median".parse().unwrap();
        assert!(matches!(
            EsConfig::from_params(&params),
            Err(SearchError::Config(_))
        ));
    }
}
