//! The three valuation strategies.
//!
//! A strategy decides which sub-factors are scored and how; weighting the
//! resulting breakdown is left to the engine so weights stay configurable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::attributes::PropertyAttributes;
use super::error::ValuationError;
use super::factors::{self, Factor, MarketAnalysis};
use super::noise::NoiseSource;
use super::tables::LookupTables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmId {
    Comprehensive,
    Simple,
    Investment,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 3] = [
        AlgorithmId::Comprehensive,
        AlgorithmId::Simple,
        AlgorithmId::Investment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::Comprehensive => "comprehensive",
            AlgorithmId::Simple => "simple",
            AlgorithmId::Investment => "investment",
        }
    }

    /// Sub-factors scored by this algorithm.
    pub fn factors(&self) -> &'static [Factor] {
        match self {
            AlgorithmId::Comprehensive => &[
                Factor::Location,
                Factor::Area,
                Factor::Layout,
                Factor::Decoration,
                Factor::MarketTrend,
                Factor::Policy,
            ],
            AlgorithmId::Simple => &[Factor::Location, Factor::Area, Factor::MarketTrend],
            AlgorithmId::Investment => &[Factor::Roi, Factor::GrowthPotential, Factor::Risk],
        }
    }

    pub fn strategy(&self) -> &'static dyn ValuationStrategy {
        match self {
            AlgorithmId::Comprehensive => &ComprehensiveStrategy,
            AlgorithmId::Simple => &SimpleStrategy,
            AlgorithmId::Investment => &InvestmentStrategy,
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValuationError::InvalidAlgorithm(s.to_string()))
    }
}

/// Sub-factor scores of one valuation, each in [0,100].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(BTreeMap<Factor, f64>);

impl ScoreBreakdown {
    pub fn from_scores(scores: impl IntoIterator<Item = (Factor, f64)>) -> Self {
        Self(scores.into_iter().collect())
    }

    pub fn get(&self, factor: Factor) -> Option<f64> {
        self.0.get(&factor).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.0.iter().map(|(factor, score)| (*factor, *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Risk breakdown reported by the comprehensive strategy. Higher is riskier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub policy_risk: f64,
    pub market_risk: f64,
    pub location_risk: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyScores {
    pub breakdown: ScoreBreakdown,
    pub risk_assessment: Option<RiskAssessment>,
    pub market_analysis: Option<MarketAnalysis>,
}

impl StrategyScores {
    fn plain(breakdown: ScoreBreakdown) -> Self {
        Self {
            breakdown,
            risk_assessment: None,
            market_analysis: None,
        }
    }
}

pub trait ValuationStrategy: Send + Sync {
    fn id(&self) -> AlgorithmId;

    fn score(
        &self,
        attributes: &PropertyAttributes,
        tables: &LookupTables,
        noise: &mut dyn NoiseSource,
    ) -> StrategyScores;
}

/// All six factors with the deep location, market and policy analyses.
pub struct ComprehensiveStrategy;

impl ValuationStrategy for ComprehensiveStrategy {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Comprehensive
    }

    fn score(
        &self,
        attributes: &PropertyAttributes,
        tables: &LookupTables,
        noise: &mut dyn NoiseSource,
    ) -> StrategyScores {
        let location = factors::analyze_location(attributes, tables);
        let market = factors::analyze_market(attributes, tables, noise);
        let policy = factors::analyze_policy(attributes, tables);

        let breakdown = ScoreBreakdown::from_scores([
            (Factor::Location, location.combined),
            (Factor::Area, factors::area_score(attributes.area)),
            (Factor::Layout, factors::layout_score(attributes)),
            (Factor::Decoration, factors::decoration_score(attributes, tables)),
            (Factor::MarketTrend, market.combined),
            (Factor::Policy, policy.combined),
        ]);

        let risk_assessment = RiskAssessment {
            policy_risk: policy.regulatory_risk,
            market_risk: 100.0 - market.supply_demand_score,
            location_risk: 100.0 - location.combined,
        };

        StrategyScores {
            breakdown,
            risk_assessment: Some(risk_assessment),
            market_analysis: Some(market),
        }
    }
}

pub struct SimpleStrategy;

impl ValuationStrategy for SimpleStrategy {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Simple
    }

    fn score(
        &self,
        attributes: &PropertyAttributes,
        tables: &LookupTables,
        noise: &mut dyn NoiseSource,
    ) -> StrategyScores {
        StrategyScores::plain(ScoreBreakdown::from_scores([
            (Factor::Location, factors::location_score(attributes, tables, noise)),
            (Factor::Area, factors::area_score(attributes.area)),
            (Factor::MarketTrend, factors::market_trend_score(attributes, tables)),
        ]))
    }
}

pub struct InvestmentStrategy;

impl ValuationStrategy for InvestmentStrategy {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Investment
    }

    fn score(
        &self,
        attributes: &PropertyAttributes,
        tables: &LookupTables,
        noise: &mut dyn NoiseSource,
    ) -> StrategyScores {
        StrategyScores::plain(ScoreBreakdown::from_scores([
            (Factor::Roi, factors::roi_score(attributes, tables, noise)),
            (
                Factor::GrowthPotential,
                factors::growth_potential_score(attributes, tables, noise),
            ),
            (Factor::Risk, factors::risk_score(attributes, tables, noise)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::noise::MidpointNoise;

    #[test]
    fn test_parse_algorithm_ids() {
        assert_eq!("comprehensive".parse::<AlgorithmId>().unwrap(), AlgorithmId::Comprehensive);
        assert_eq!(" simple ".parse::<AlgorithmId>().unwrap(), AlgorithmId::Simple);
        assert_eq!("Investment".parse::<AlgorithmId>().unwrap(), AlgorithmId::Investment);
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let err = "bogus".parse::<AlgorithmId>().unwrap_err();
        assert_eq!(err, ValuationError::InvalidAlgorithm("bogus".to_string()));
    }

    #[test]
    fn test_strategy_ids_match() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.strategy().id(), id);
        }
    }

    #[test]
    fn test_breakdown_covers_algorithm_factors() {
        let tables = LookupTables::default();
        let attrs = PropertyAttributes::new(100.0, "雨湖区").with_layout("3室2厅");
        for id in AlgorithmId::ALL {
            let scores = id.strategy().score(&attrs, &tables, &mut MidpointNoise);
            let factors: Vec<Factor> = scores.breakdown.iter().map(|(f, _)| f).collect();
            let mut expected = id.factors().to_vec();
            expected.sort();
            assert_eq!(factors, expected);
        }
    }

    #[test]
    fn test_comprehensive_risk_assessment() {
        let tables = LookupTables::default();
        let attrs = PropertyAttributes::new(100.0, "雨湖区");
        let scores = ComprehensiveStrategy.score(&attrs, &tables, &mut MidpointNoise);

        let risk = scores.risk_assessment.unwrap();
        assert_eq!(risk.policy_risk, 30.0);
        assert_eq!(risk.market_risk, 25.0);
        assert!((risk.location_risk - 15.0).abs() < 1e-9);
        assert!(scores.market_analysis.is_some());
    }

    #[test]
    fn test_simple_and_investment_have_no_extras() {
        let tables = LookupTables::default();
        let attrs = PropertyAttributes::new(100.0, "雨湖区");
        for strategy in [&SimpleStrategy as &dyn ValuationStrategy, &InvestmentStrategy] {
            let scores = strategy.score(&attrs, &tables, &mut MidpointNoise);
            assert!(scores.risk_assessment.is_none());
            assert!(scores.market_analysis.is_none());
        }
    }

    #[test]
    fn test_breakdown_serializes_with_factor_names() {
        let breakdown = ScoreBreakdown::from_scores([(Factor::MarketTrend, 20.0), (Factor::Area, 100.0)]);
        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"area":100.0,"marketTrend":20.0}"#);
    }
}
