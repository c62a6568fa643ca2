use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::noise::NoiseMode;
use super::strategy::AlgorithmId;
use super::tables::DistrictProfile;
use super::weights::StrategyWeights;

/// Valuation engine configuration.
///
/// Every field is optional; anything left out falls back to the
/// compiled-in tables and weights.
///
/// Example YAML:
/// ```yaml
/// valuation:
///   default_base_price: 6000
///   noise: seeded
///   seed: 0
///   weights:
///     simple: { location: 0.5, area: 0.3, marketTrend: 0.2 }
///   districts:
///     雨湖区: { location_factor: 1.1, market_trend: 1.02 }
///   decoration_scores: { 豪华: 100 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValuationConfig {
    /// Base price per m² when the property has no district average (default: 6000)
    #[serde(default)]
    pub default_base_price: Option<f64>,

    /// Market noise: `seeded` (per-property pseudo-random) or `midpoint`
    #[serde(default)]
    pub noise: Option<NoiseMode>,

    /// Mixed into the per-property noise seed
    #[serde(default)]
    pub seed: Option<u64>,

    /// Per-algorithm weight overrides; each vector replaces the default one
    #[serde(default)]
    pub weights: Option<BTreeMap<AlgorithmId, StrategyWeights>>,

    /// District profiles, added to or replacing the built-in ones
    #[serde(default)]
    pub districts: Option<BTreeMap<String, DistrictProfile>>,

    /// Decoration scores, added to or replacing the built-in ones
    #[serde(default)]
    pub decoration_scores: Option<BTreeMap<String, f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::Factor;

    #[test]
    fn test_empty_valuation_config_parse() {
        let config: ValuationConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ValuationConfig::default());
    }

    #[test]
    fn test_full_valuation_config_parse() {
        let yaml = r#"
default_base_price: 7200
noise: midpoint
seed: 42
weights:
  investment:
    roi: 0.5
    growthPotential: 0.25
    risk: 0.25
districts:
  天心区:
    location_factor: 1.2
    distance_to_center: 1500
decoration_scores:
  豪华: 100
"#;
        let config: ValuationConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.default_base_price, Some(7200.0));
        assert_eq!(config.noise, Some(NoiseMode::Midpoint));
        assert_eq!(config.seed, Some(42));

        let weights = config.weights.unwrap();
        assert_eq!(weights[&AlgorithmId::Investment].get(Factor::Roi), 0.5);

        let districts = config.districts.unwrap();
        assert_eq!(districts["天心区"].distance_to_center, 1500.0);
        assert_eq!(config.decoration_scores.unwrap()["豪华"], 100.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ValuationConfig, _> = serde_saphyr::from_str("base: 1\n");
        assert!(result.is_err());
    }
}
