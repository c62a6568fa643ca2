use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::valuation::{
    AlgorithmId, LookupTables, NoiseMode, StrategyWeights, ValuationConfig, DEFAULT_BASE_PRICE,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Algorithm used when `--algorithm` is not given (default: comprehensive)
    #[serde(default)]
    pub default_algorithm: Option<AlgorithmId>,

    #[serde(default)]
    pub valuation: Option<ValuationConfig>,
}

impl Config {
    /// A config spelling out every built-in table and weight, as written by
    /// `valuer init`.
    pub fn with_builtin_defaults() -> Self {
        let tables = LookupTables::default();
        let weights: BTreeMap<AlgorithmId, StrategyWeights> = AlgorithmId::ALL
            .into_iter()
            .map(|algorithm| (algorithm, StrategyWeights::default_for(algorithm)))
            .collect();

        Self {
            default_algorithm: Some(AlgorithmId::Comprehensive),
            valuation: Some(ValuationConfig {
                default_base_price: Some(DEFAULT_BASE_PRICE),
                noise: Some(NoiseMode::Seeded),
                seed: Some(0),
                weights: Some(weights),
                districts: Some(tables.districts),
                decoration_scores: Some(tables.decoration_scores),
            }),
        }
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.default_algorithm.unwrap_or(AlgorithmId::Comprehensive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::validate_valuation;

    #[test]
    fn test_builtin_defaults_validate() {
        let config = Config::with_builtin_defaults();
        assert!(validate_valuation(config.valuation.as_ref().unwrap()).is_ok());
        assert_eq!(config.algorithm(), AlgorithmId::Comprehensive);
    }

    #[test]
    fn test_builtin_defaults_serde_roundtrip() {
        let config = Config::with_builtin_defaults();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
default_algorithm: investment
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.algorithm(), AlgorithmId::Investment);
        assert!(config.valuation.is_none());
    }
}
