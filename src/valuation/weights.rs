use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::factors::Factor;
use super::strategy::{AlgorithmId, ScoreBreakdown};

/// Allowed deviation of a weight vector's sum from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Weight per sub-factor for one strategy.
///
/// Example YAML:
/// ```yaml
/// location: 0.5
/// area: 0.3
/// marketTrend: 0.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyWeights(BTreeMap<Factor, f64>);

impl StrategyWeights {
    pub fn new(weights: impl IntoIterator<Item = (Factor, f64)>) -> Self {
        Self(weights.into_iter().collect())
    }

    pub fn default_for(algorithm: AlgorithmId) -> Self {
        match algorithm {
            AlgorithmId::Comprehensive => Self::new([
                (Factor::Location, 0.35),
                (Factor::Area, 0.15),
                (Factor::Layout, 0.10),
                (Factor::Decoration, 0.10),
                (Factor::MarketTrend, 0.15),
                (Factor::Policy, 0.15),
            ]),
            AlgorithmId::Simple => Self::new([
                (Factor::Location, 0.5),
                (Factor::Area, 0.3),
                (Factor::MarketTrend, 0.2),
            ]),
            AlgorithmId::Investment => Self::new([
                (Factor::Roi, 0.4),
                (Factor::GrowthPotential, 0.3),
                (Factor::Risk, 0.3),
            ]),
        }
    }

    /// Weight of `factor`, zero when the vector does not use it.
    pub fn get(&self, factor: Factor) -> f64 {
        self.0.get(&factor).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.0.iter().map(|(factor, weight)| (*factor, *weight))
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Σ score × weight over the weighted factors.
    pub fn weighted_sum(&self, breakdown: &ScoreBreakdown) -> f64 {
        self.iter()
            .map(|(factor, weight)| breakdown.get(factor).unwrap_or(0.0) * weight)
            .sum()
    }

    /// Check this vector against the factors `algorithm` scores.
    /// Returns all problems at once.
    pub fn validate(&self, algorithm: AlgorithmId) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let prefix = format!("valuation.weights.{}", algorithm);
        let expected = algorithm.factors();

        for (factor, weight) in self.iter() {
            if !expected.contains(&factor) {
                errors.push(format!(
                    "{}.{}: factor is not scored by this algorithm",
                    prefix, factor
                ));
            }
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                errors.push(format!(
                    "{}.{}: weight must be between 0 and 1, got {}",
                    prefix, factor, weight
                ));
            }
        }

        for factor in expected {
            if !self.0.contains_key(factor) {
                errors.push(format!("{}.{}: missing weight", prefix, factor));
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            errors.push(format!("{}: weights must sum to 1.0, got {}", prefix, total));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
