use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::attributes::PropertyAttributes;
use super::noise::NoiseSource;
use super::tables::LookupTables;

/// Ideal floor area band in m²
pub const IDEAL_AREA_MIN: f64 = 90.0;
pub const IDEAL_AREA_MAX: f64 = 120.0;

/// Ideal number of rooms per 100 m²
pub const IDEAL_DENSITY_MIN: f64 = 3.0;
pub const IDEAL_DENSITY_MAX: f64 = 4.0;

pub const DEFAULT_ROOMS: u32 = 3;

// Perturbation ranges
const TRANSPORT_NOISE: (f64, f64) = (40.0, 60.0);
const AMENITIES_NOISE: (f64, f64) = (40.0, 60.0);
const PRICE_COMPARISON_NOISE: (f64, f64) = (80.0, 100.0);
const ROI_NOISE: (f64, f64) = (-1.5, 1.5);
const GROWTH_NOISE: (f64, f64) = (-0.5, 0.5);
const RISK_NOISE: (f64, f64) = (-0.05, 0.05);

static ROOMS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)室").expect("room pattern is a valid regex"));

/// Sub-factor names, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Factor {
    Location,
    Area,
    Layout,
    Decoration,
    MarketTrend,
    Policy,
    Roi,
    GrowthPotential,
    Risk,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Location => "location",
            Factor::Area => "area",
            Factor::Layout => "layout",
            Factor::Decoration => "decoration",
            Factor::MarketTrend => "marketTrend",
            Factor::Policy => "policy",
            Factor::Roi => "roi",
            Factor::GrowthPotential => "growthPotential",
            Factor::Risk => "risk",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Factor::Location => "Location",
            Factor::Area => "Area",
            Factor::Layout => "Layout",
            Factor::Decoration => "Decoration",
            Factor::MarketTrend => "Market trend",
            Factor::Policy => "Policy",
            Factor::Roi => "ROI",
            Factor::GrowthPotential => "Growth potential",
            Factor::Risk => "Risk",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Location score from the district premium plus sampled transport and
/// amenity access.
pub fn location_score(
    attributes: &PropertyAttributes,
    tables: &LookupTables,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let factor = tables.district(&attributes.district).location_factor;
    let transport = noise.sample(TRANSPORT_NOISE.0, TRANSPORT_NOISE.1);
    let amenities = noise.sample(AMENITIES_NOISE.0, AMENITIES_NOISE.1);
    clamp_score(50.0 * factor + transport * 0.3 + amenities * 0.3)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationAnalysis {
    pub center_distance: f64,
    pub transport: f64,
    pub amenities: f64,
    pub environment: f64,
    pub combined: f64,
}

/// Four-dimension location analysis: distance to center (0.4), transport
/// (0.3), amenities (0.2), environment (0.1).
pub fn analyze_location(attributes: &PropertyAttributes, tables: &LookupTables) -> LocationAnalysis {
    let profile = tables.district(&attributes.district);
    let center_distance = clamp_score(100.0 - profile.distance_to_center / 100.0);
    let transport = clamp_score(profile.transport);
    let amenities = clamp_score(profile.amenities);
    let environment = clamp_score(profile.environment);
    let combined = clamp_score(
        center_distance * 0.4 + transport * 0.3 + amenities * 0.2 + environment * 0.1,
    );
    LocationAnalysis {
        center_distance,
        transport,
        amenities,
        environment,
        combined,
    }
}

pub fn area_score(area: f64) -> f64 {
    if (IDEAL_AREA_MIN..=IDEAL_AREA_MAX).contains(&area) {
        100.0
    } else if area < IDEAL_AREA_MIN {
        clamp_score(100.0 - (IDEAL_AREA_MIN - area) * 2.0)
    } else {
        clamp_score(100.0 - (area - IDEAL_AREA_MAX) * 1.5)
    }
}

/// Room count from a layout string like "3室2厅"; [`DEFAULT_ROOMS`] when the
/// layout carries none. Counts too large for a `u32` saturate.
pub fn extract_rooms(layout: &str) -> u32 {
    match ROOMS_PATTERN.captures(layout) {
        // the pattern only captures ASCII digits, so parsing fails on overflow alone
        Some(caps) => caps[1].parse().unwrap_or(u32::MAX),
        None => DEFAULT_ROOMS,
    }
}

pub fn layout_score(attributes: &PropertyAttributes) -> f64 {
    let rooms = extract_rooms(&attributes.layout) as f64;
    let density = rooms * 100.0 / attributes.area;

    if (IDEAL_DENSITY_MIN..=IDEAL_DENSITY_MAX).contains(&density) {
        100.0
    } else if density < IDEAL_DENSITY_MIN {
        clamp_score(100.0 - (IDEAL_DENSITY_MIN - density) * 33.0)
    } else {
        clamp_score(100.0 - (density - IDEAL_DENSITY_MAX) * 25.0)
    }
}

pub fn decoration_score(attributes: &PropertyAttributes, tables: &LookupTables) -> f64 {
    clamp_score(tables.decoration_score(&attributes.decoration))
}

pub fn market_trend_score(attributes: &PropertyAttributes, tables: &LookupTables) -> f64 {
    let trend = tables.district(&attributes.district).market_trend;
    clamp_score((trend - 0.95) * 200.0)
}

/// Market factors behind the comprehensive market-trend score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub trend_score: f64,
    pub supply_demand_score: f64,
    pub price_comparison_score: f64,
    pub combined: f64,
}

/// Trend (0.5), supply/demand (0.3) and sampled price comparison (0.2).
pub fn analyze_market(
    attributes: &PropertyAttributes,
    tables: &LookupTables,
    noise: &mut dyn NoiseSource,
) -> MarketAnalysis {
    let trend_score = market_trend_score(attributes, tables);
    let supply_demand_score = clamp_score(tables.district(&attributes.district).supply_demand);
    let price_comparison_score =
        clamp_score(noise.sample(PRICE_COMPARISON_NOISE.0, PRICE_COMPARISON_NOISE.1));
    let combined = clamp_score(
        trend_score * 0.5 + supply_demand_score * 0.3 + price_comparison_score * 0.2,
    );
    MarketAnalysis {
        trend_score,
        supply_demand_score,
        price_comparison_score,
        combined,
    }
}

pub fn policy_score(attributes: &PropertyAttributes, tables: &LookupTables) -> f64 {
    let factor = tables.district(&attributes.district).policy_factor;
    clamp_score(50.0 * factor + 25.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyAnalysis {
    pub policy_score: f64,
    pub regulatory_risk: f64,
    pub incentive_support: f64,
    pub combined: f64,
}

/// Direct policy score (0.6), inverted regulatory risk (0.2) and incentive
/// support (0.2).
pub fn analyze_policy(attributes: &PropertyAttributes, tables: &LookupTables) -> PolicyAnalysis {
    let profile = tables.district(&attributes.district);
    let policy_score = policy_score(attributes, tables);
    let regulatory_risk = clamp_score(profile.regulatory_risk);
    let incentive_support = clamp_score(profile.incentive_support);
    let combined = clamp_score(
        policy_score * 0.6 + (100.0 - regulatory_risk) * 0.2 + incentive_support * 0.2,
    );
    PolicyAnalysis {
        policy_score,
        regulatory_risk,
        incentive_support,
        combined,
    }
}

pub fn roi_score(
    attributes: &PropertyAttributes,
    tables: &LookupTables,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let base = tables.district(&attributes.district).base_roi;
    let variation = noise.sample(ROI_NOISE.0, ROI_NOISE.1);
    clamp_score((base + variation) * 20.0)
}

pub fn growth_potential_score(
    attributes: &PropertyAttributes,
    tables: &LookupTables,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let rate = tables.district(&attributes.district).growth_rate;
    let variation = noise.sample(GROWTH_NOISE.0, GROWTH_NOISE.1);
    clamp_score((rate + variation) * 15.0 + 25.0)
}

/// Higher is better: a low-risk district scores high.
pub fn risk_score(
    attributes: &PropertyAttributes,
    tables: &LookupTables,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let factor = tables.district(&attributes.district).risk_factor;
    let variation = noise.sample(RISK_NOISE.0, RISK_NOISE.1);
    clamp_score(100.0 - 50.0 * (factor + variation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::noise::{MidpointNoise, SeededNoise};

    fn attrs(area: f64, district: &str) -> PropertyAttributes {
        PropertyAttributes::new(area, district)
    }

    #[test]
    fn test_area_inside_ideal_band() {
        assert_eq!(area_score(105.0), 100.0);
        assert_eq!(area_score(90.0), 100.0);
        assert_eq!(area_score(120.0), 100.0);
    }

    #[test]
    fn test_area_below_band() {
        assert_eq!(area_score(80.0), 80.0);
        assert_eq!(area_score(40.0), 0.0);
        assert_eq!(area_score(10.0), 0.0);
    }

    #[test]
    fn test_area_above_band() {
        assert_eq!(area_score(150.0), 55.0);
        assert_eq!(area_score(300.0), 0.0);
    }

    #[test]
    fn test_extract_rooms() {
        assert_eq!(extract_rooms("3室2厅"), 3);
        assert_eq!(extract_rooms("12室4厅3卫"), 12);
        assert_eq!(extract_rooms("loft"), DEFAULT_ROOMS);
        assert_eq!(extract_rooms(""), DEFAULT_ROOMS);
    }

    #[test]
    fn test_layout_ideal_density() {
        let a = attrs(100.0, "雨湖区").with_layout("3室2厅");
        assert_eq!(layout_score(&a), 100.0);

        let a = attrs(100.0, "雨湖区").with_layout("4室2厅");
        assert_eq!(layout_score(&a), 100.0);
    }

    #[test]
    fn test_layout_sparse_and_dense() {
        // 2 rooms per 100 m²: 100 - 1 * 33
        let a = attrs(100.0, "雨湖区").with_layout("2室1厅");
        assert_eq!(layout_score(&a), 67.0);

        // 5 rooms per 100 m²: 100 - 1 * 25
        let a = attrs(100.0, "雨湖区").with_layout("5室2厅");
        assert_eq!(layout_score(&a), 75.0);

        // 3 rooms in 30 m²: density 10, floored
        let a = attrs(30.0, "雨湖区").with_layout("3室");
        assert_eq!(layout_score(&a), 0.0);
    }

    #[test]
    fn test_oversized_room_count_saturates() {
        assert_eq!(extract_rooms("99999999999室"), u32::MAX);
        assert_eq!(extract_rooms("٣室"), DEFAULT_ROOMS);

        let a = attrs(100.0, "雨湖区").with_layout("99999999999室");
        assert_eq!(layout_score(&a), 0.0);
    }

    #[test]
    fn test_layout_defaults_to_three_rooms() {
        let a = attrs(100.0, "雨湖区");
        assert_eq!(layout_score(&a), 100.0);
    }

    #[test]
    fn test_decoration_scores() {
        let tables = LookupTables::default();
        assert_eq!(decoration_score(&attrs(100.0, "").with_decoration("毛坯"), &tables), 30.0);
        assert_eq!(decoration_score(&attrs(100.0, "").with_decoration("精装"), &tables), 90.0);
        assert_eq!(decoration_score(&attrs(100.0, "").with_decoration("宫殿"), &tables), 60.0);
    }

    #[test]
    fn test_market_trend_score() {
        let tables = LookupTables::default();
        // (1.05 - 0.95) * 200 = 20
        assert!((market_trend_score(&attrs(100.0, "九华经开区"), &tables) - 20.0).abs() < 1e-9);
        // unknown district: trend 1.0 -> 10
        assert!((market_trend_score(&attrs(100.0, "未知区"), &tables) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_basic_location_with_midpoint_noise() {
        let tables = LookupTables::default();
        let mut noise = MidpointNoise;
        // 50 * 1.1 + 50 * 0.3 + 50 * 0.3 = 85
        let score = location_score(&attrs(100.0, "雨湖区"), &tables, &mut noise);
        assert!((score - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_deep_location_analysis() {
        let tables = LookupTables::default();
        let analysis = analyze_location(&attrs(100.0, "雨湖区"), &tables);
        // distance 2000 -> 80
        assert_eq!(analysis.center_distance, 80.0);
        // 80*0.4 + 90*0.3 + 95*0.2 + 70*0.1 = 85
        assert!((analysis.combined - 85.0).abs() < 1e-9);

        let unknown = analyze_location(&attrs(100.0, "未知区"), &tables);
        // 50*0.4 + 70*0.3 + 75*0.2 + 80*0.1 = 64
        assert!((unknown.combined - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_market_analysis_with_midpoint_noise() {
        let tables = LookupTables::default();
        let analysis = analyze_market(&attrs(100.0, "岳塘区"), &tables, &mut MidpointNoise);
        assert!((analysis.trend_score - 16.0).abs() < 1e-9);
        assert_eq!(analysis.supply_demand_score, 80.0);
        assert_eq!(analysis.price_comparison_score, 90.0);
        // 16*0.5 + 80*0.3 + 90*0.2 = 50
        assert!((analysis.combined - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_policy_analysis() {
        let tables = LookupTables::default();
        let analysis = analyze_policy(&attrs(100.0, "九华经开区"), &tables);
        // 50 * 1.05 + 25 = 77.5
        assert!((analysis.policy_score - 77.5).abs() < 1e-9);
        assert_eq!(analysis.regulatory_risk, 20.0);
        // 77.5*0.6 + 80*0.2 + 90*0.2 = 80.5
        assert!((analysis.combined - 80.5).abs() < 1e-9);
    }

    #[test]
    fn test_investment_scores_with_midpoint_noise() {
        let tables = LookupTables::default();
        let a = attrs(100.0, "九华经开区");
        let mut noise = MidpointNoise;
        assert!((roi_score(&a, &tables, &mut noise) - 70.0).abs() < 1e-9);
        assert!((growth_potential_score(&a, &tables, &mut noise) - 100.0).abs() < 1e-9);
        assert!((risk_score(&a, &tables, &mut noise) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_investment_scores_bounded_under_noise() {
        let tables = LookupTables::default();
        let mut noise = SeededNoise::from_seed(42);
        for district in ["雨湖区", "岳塘区", "九华经开区", "昭山示范区", "湘潭县", "?"] {
            let a = attrs(100.0, district);
            for _ in 0..50 {
                for score in [
                    roi_score(&a, &tables, &mut noise),
                    growth_potential_score(&a, &tables, &mut noise),
                    risk_score(&a, &tables, &mut noise),
                    location_score(&a, &tables, &mut noise),
                ] {
                    assert!((0.0..=100.0).contains(&score));
                }
            }
        }
    }

    #[test]
    fn test_factor_names() {
        assert_eq!(Factor::MarketTrend.as_str(), "marketTrend");
        assert_eq!(Factor::GrowthPotential.to_string(), "growthPotential");
        assert_eq!(serde_json::to_string(&Factor::Roi).unwrap(), "\"roi\"");
    }
}
