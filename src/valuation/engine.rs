use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::attributes::PropertyAttributes;
use super::config::ValuationConfig;
use super::error::{Result, ValuationError};
use super::factors::MarketAnalysis;
use super::noise::{NoiseMode, NoiseSource};
use super::projection::{project_price, AdviceTier, ConfidenceBounds, DEFAULT_BASE_PRICE};
use super::strategy::{AlgorithmId, RiskAssessment, ScoreBreakdown};
use super::tables::LookupTables;
use super::validation::validate_valuation;
use super::weights::StrategyWeights;

/// Outcome of one valuation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Price per m², rounded to the nearest currency unit
    pub estimated_price: i64,
    pub confidence: f64,
    /// Weighted score before confidence bounding
    pub final_score: f64,
    pub base_price: f64,
    pub breakdown: ScoreBreakdown,
    pub strategy: AlgorithmId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<RiskAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_analysis: Option<MarketAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_advice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct AlgorithmWeights {
    comprehensive: StrategyWeights,
    simple: StrategyWeights,
    investment: StrategyWeights,
}

impl Default for AlgorithmWeights {
    fn default() -> Self {
        Self {
            comprehensive: StrategyWeights::default_for(AlgorithmId::Comprehensive),
            simple: StrategyWeights::default_for(AlgorithmId::Simple),
            investment: StrategyWeights::default_for(AlgorithmId::Investment),
        }
    }
}

impl AlgorithmWeights {
    fn get(&self, algorithm: AlgorithmId) -> &StrategyWeights {
        match algorithm {
            AlgorithmId::Comprehensive => &self.comprehensive,
            AlgorithmId::Simple => &self.simple,
            AlgorithmId::Investment => &self.investment,
        }
    }

    fn set(&mut self, algorithm: AlgorithmId, weights: StrategyWeights) {
        match algorithm {
            AlgorithmId::Comprehensive => self.comprehensive = weights,
            AlgorithmId::Simple => self.simple = weights,
            AlgorithmId::Investment => self.investment = weights,
        }
    }
}

/// Stateless valuation engine over read-only tables and weights.
///
/// Safe to share between threads; every call builds its own noise source.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationEngine {
    tables: LookupTables,
    weights: AlgorithmWeights,
    default_base_price: f64,
    noise: NoiseMode,
    seed: u64,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self {
            tables: LookupTables::default(),
            weights: AlgorithmWeights::default(),
            default_base_price: DEFAULT_BASE_PRICE,
            noise: NoiseMode::default(),
            seed: 0,
        }
    }
}

impl ValuationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from configuration, rejecting invalid weights or tables.
    pub fn from_config(config: &ValuationConfig) -> Result<Self> {
        validate_valuation(config).map_err(ValuationError::Config)?;

        let mut weights = AlgorithmWeights::default();
        if let Some(ref overrides) = config.weights {
            for (algorithm, vector) in overrides {
                weights.set(*algorithm, vector.clone());
            }
        }

        Ok(Self {
            tables: LookupTables::default()
                .merged_with(config.districts.as_ref(), config.decoration_scores.as_ref()),
            weights,
            default_base_price: config.default_base_price.unwrap_or(DEFAULT_BASE_PRICE),
            noise: config.noise.unwrap_or_default(),
            seed: config.seed.unwrap_or(0),
        })
    }

    pub fn with_tables(mut self, tables: LookupTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_noise(mut self, noise: NoiseMode) -> Self {
        self.noise = noise;
        self
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    pub fn weights(&self, algorithm: AlgorithmId) -> &StrategyWeights {
        self.weights.get(algorithm)
    }

    pub fn default_base_price(&self) -> f64 {
        self.default_base_price
    }

    /// Estimate with an algorithm id string such as `"comprehensive"`.
    pub fn estimate_value_str(
        &self,
        attributes: &PropertyAttributes,
        algorithm_id: &str,
    ) -> Result<ValuationResult> {
        let algorithm: AlgorithmId = algorithm_id.parse()?;
        self.estimate_value(attributes, algorithm)
    }

    pub fn estimate_value(
        &self,
        attributes: &PropertyAttributes,
        algorithm: AlgorithmId,
    ) -> Result<ValuationResult> {
        let mut noise = self.noise.source_for(attributes, self.seed);
        self.estimate_with_noise(attributes, algorithm, noise.as_mut())
    }

    /// Estimate with a caller-supplied noise source.
    pub fn estimate_with_noise(
        &self,
        attributes: &PropertyAttributes,
        algorithm: AlgorithmId,
        noise: &mut dyn NoiseSource,
    ) -> Result<ValuationResult> {
        attributes.validate()?;

        if !self.tables.is_known_district(&attributes.district) {
            debug!(district = %attributes.district, "district not in lookup table, using neutral profile");
        }

        let scores = algorithm.strategy().score(attributes, &self.tables, noise);
        for (factor, score) in scores.breakdown.iter() {
            debug!(%algorithm, %factor, score, "factor scored");
        }

        let final_score = self.weights(algorithm).weighted_sum(&scores.breakdown);
        let confidence = ConfidenceBounds::for_algorithm(algorithm).bound(final_score);
        let base_price = attributes
            .district_average_price
            .unwrap_or(self.default_base_price);
        let estimated_price = project_price(base_price, final_score).ok_or_else(|| {
            ValuationError::validation(
                "districtAveragePrice",
                format!("projected price for base {} is out of range", base_price),
            )
        })?;

        let investment_advice = match algorithm {
            AlgorithmId::Investment => Some(AdviceTier::classify(confidence).message().to_string()),
            _ => None,
        };

        info!(
            %algorithm,
            district = %attributes.district,
            final_score,
            confidence,
            estimated_price,
            "valuation complete"
        );

        Ok(ValuationResult {
            estimated_price,
            confidence,
            final_score,
            base_price,
            breakdown: scores.breakdown,
            strategy: algorithm,
            risk_assessment: scores.risk_assessment,
            market_analysis: scores.market_analysis,
            investment_advice,
        })
    }

    /// Run every algorithm on the same attributes, in [`AlgorithmId::ALL`] order.
    pub fn compare(&self, attributes: &PropertyAttributes) -> Result<Vec<ValuationResult>> {
        AlgorithmId::ALL
            .into_iter()
            .map(|algorithm| self.estimate_value(attributes, algorithm))
            .collect()
    }
}

/// Estimate with the default engine.
pub fn estimate_value(attributes: &PropertyAttributes, algorithm_id: &str) -> Result<ValuationResult> {
    ValuationEngine::default().estimate_value_str(attributes, algorithm_id)
}
