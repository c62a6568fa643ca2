//! District and decoration lookup tables.
//!
//! Tables are plain data injected into the engine at construction time. The
//! compiled-in defaults cover the five districts of 湘潭; any district not in
//! the table resolves to [`DistrictProfile::NEUTRAL`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decoration score for values missing from the decoration table.
pub const DEFAULT_DECORATION_SCORE: f64 = 60.0;

/// Per-district adjustment values used by the factor scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistrictProfile {
    /// Premium (>1) or discount (<1) applied to the basic location score
    pub location_factor: f64,
    /// Distance to the city center in metres
    pub distance_to_center: f64,
    pub transport: f64,
    pub amenities: f64,
    pub environment: f64,
    /// Year-over-year price trend multiplier
    pub market_trend: f64,
    pub supply_demand: f64,
    pub policy_factor: f64,
    pub regulatory_risk: f64,
    pub incentive_support: f64,
    /// Average rental return in percent
    pub base_roi: f64,
    /// Expected annual growth in percent
    pub growth_rate: f64,
    pub risk_factor: f64,
}

impl DistrictProfile {
    pub const NEUTRAL: DistrictProfile = DistrictProfile {
        location_factor: 1.0,
        distance_to_center: 5000.0,
        transport: 70.0,
        amenities: 75.0,
        environment: 80.0,
        market_trend: 1.0,
        supply_demand: 80.0,
        policy_factor: 1.0,
        regulatory_risk: 25.0,
        incentive_support: 70.0,
        base_roi: 3.5,
        growth_rate: 3.0,
        risk_factor: 1.0,
    };
}

impl Default for DistrictProfile {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

static NEUTRAL_DISTRICT: DistrictProfile = DistrictProfile::NEUTRAL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    pub districts: BTreeMap<String, DistrictProfile>,
    pub decoration_scores: BTreeMap<String, f64>,
}

impl Default for LookupTables {
    fn default() -> Self {
        let districts = [
            ("雨湖区", 1.1, 2000.0, 90.0, 95.0, 70.0, 1.02, 75.0, 0.95, 30.0, 60.0, 2.5, 0.8),
            ("岳塘区", 1.05, 3000.0, 85.0, 90.0, 75.0, 1.03, 80.0, 0.98, 25.0, 65.0, 3.0, 0.85),
            ("九华经开区", 1.0, 8000.0, 75.0, 80.0, 85.0, 1.05, 90.0, 1.05, 20.0, 90.0, 5.0, 1.1),
            ("昭山示范区", 0.95, 12000.0, 65.0, 70.0, 95.0, 1.04, 85.0, 1.03, 15.0, 85.0, 4.5, 1.05),
            ("湘潭县", 0.9, 15000.0, 60.0, 65.0, 90.0, 1.01, 70.0, 0.97, 35.0, 70.0, 2.0, 0.9),
        ]
        .into_iter()
        .map(
            |(name, location, distance, transport, amenities, environment, trend, supply, policy, regulatory, incentive, growth, risk)| {
                (
                    name.to_string(),
                    DistrictProfile {
                        location_factor: location,
                        distance_to_center: distance,
                        transport,
                        amenities,
                        environment,
                        market_trend: trend,
                        supply_demand: supply,
                        policy_factor: policy,
                        regulatory_risk: regulatory,
                        incentive_support: incentive,
                        base_roi: 3.5,
                        growth_rate: growth,
                        risk_factor: risk,
                    },
                )
            },
        )
        .collect();

        let decoration_scores = [("精装", 90.0), ("简装", 60.0), ("毛坯", 30.0)]
            .into_iter()
            .map(|(name, score)| (name.to_string(), score))
            .collect();

        Self {
            districts,
            decoration_scores,
        }
    }
}

impl LookupTables {
    /// Profile for `district`, or the neutral profile when it is unknown.
    pub fn district(&self, district: &str) -> &DistrictProfile {
        self.districts.get(district).unwrap_or(&NEUTRAL_DISTRICT)
    }

    pub fn is_known_district(&self, district: &str) -> bool {
        self.districts.contains_key(district)
    }

    pub fn decoration_score(&self, decoration: &str) -> f64 {
        self.decoration_scores
            .get(decoration)
            .copied()
            .unwrap_or(DEFAULT_DECORATION_SCORE)
    }

    /// Apply overrides on top of these tables. Override entries replace
    /// whole district profiles and single decoration scores.
    pub fn merged_with(
        mut self,
        districts: Option<&BTreeMap<String, DistrictProfile>>,
        decoration_scores: Option<&BTreeMap<String, f64>>,
    ) -> Self {
        if let Some(districts) = districts {
            for (name, profile) in districts {
                self.districts.insert(name.clone(), profile.clone());
            }
        }
        if let Some(scores) = decoration_scores {
            for (name, score) in scores {
                self.decoration_scores.insert(name.clone(), *score);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_cover_five_districts() {
        let tables = LookupTables::default();
        assert_eq!(tables.districts.len(), 5);
        assert_eq!(tables.district("雨湖区").location_factor, 1.1);
        assert_eq!(tables.district("湘潭县").distance_to_center, 15000.0);
        assert_eq!(tables.district("九华经开区").growth_rate, 5.0);
    }

    #[test]
    fn test_unknown_district_is_neutral() {
        let tables = LookupTables::default();
        assert!(!tables.is_known_district("朝阳区"));
        assert_eq!(tables.district("朝阳区"), &DistrictProfile::NEUTRAL);
    }

    #[test]
    fn test_decoration_lookup() {
        let tables = LookupTables::default();
        assert_eq!(tables.decoration_score("精装"), 90.0);
        assert_eq!(tables.decoration_score("毛坯"), 30.0);
        assert_eq!(tables.decoration_score("豪华"), DEFAULT_DECORATION_SCORE);
        assert_eq!(tables.decoration_score(""), DEFAULT_DECORATION_SCORE);
    }

    #[test]
    fn test_merge_overrides() {
        let mut districts = BTreeMap::new();
        districts.insert(
            "天心区".to_string(),
            DistrictProfile {
                location_factor: 1.2,
                ..DistrictProfile::NEUTRAL
            },
        );
        let mut decorations = BTreeMap::new();
        decorations.insert("豪华".to_string(), 100.0);

        let tables = LookupTables::default().merged_with(Some(&districts), Some(&decorations));
        assert_eq!(tables.districts.len(), 6);
        assert_eq!(tables.district("天心区").location_factor, 1.2);
        assert_eq!(tables.decoration_score("豪华"), 100.0);
        assert_eq!(tables.decoration_score("精装"), 90.0);
    }

    #[test]
    fn test_partial_profile_parse_uses_neutral_fields() {
        let yaml = "location_factor: 1.3\nmarket_trend: 1.1\n";
        let profile: DistrictProfile = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(profile.location_factor, 1.3);
        assert_eq!(profile.market_trend, 1.1);
        assert_eq!(profile.transport, DistrictProfile::NEUTRAL.transport);
    }
}
