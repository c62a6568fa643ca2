use super::config::ValuationConfig;
use super::projection::MAX_DEFAULT_BASE_PRICE;
use super::tables::DistrictProfile;

/// Validate valuation configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_valuation(config: &ValuationConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(price) = config.default_base_price {
        if !price.is_finite() || price <= 0.0 {
            errors.push(format!(
                "valuation.default_base_price: must be positive, got {}",
                price
            ));
        } else if price > MAX_DEFAULT_BASE_PRICE {
            errors.push(format!(
                "valuation.default_base_price: must be at most {}, got {}",
                MAX_DEFAULT_BASE_PRICE, price
            ));
        }
    }

    if let Some(ref weights) = config.weights {
        for (algorithm, vector) in weights {
            if let Err(mut problems) = vector.validate(*algorithm) {
                errors.append(&mut problems);
            }
        }
    }

    if let Some(ref districts) = config.districts {
        for (name, profile) in districts {
            validate_profile(name, profile, &mut errors);
        }
    }

    if let Some(ref scores) = config.decoration_scores {
        for (name, score) in scores {
            if !score.is_finite() || !(0.0..=100.0).contains(score) {
                errors.push(format!(
                    "valuation.decoration_scores.{}: must be between 0 and 100, got {}",
                    name, score
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_profile(name: &str, profile: &DistrictProfile, errors: &mut Vec<String>) {
    let fields = [
        ("location_factor", profile.location_factor),
        ("distance_to_center", profile.distance_to_center),
        ("transport", profile.transport),
        ("amenities", profile.amenities),
        ("environment", profile.environment),
        ("market_trend", profile.market_trend),
        ("supply_demand", profile.supply_demand),
        ("policy_factor", profile.policy_factor),
        ("regulatory_risk", profile.regulatory_risk),
        ("incentive_support", profile.incentive_support),
        ("base_roi", profile.base_roi),
        ("growth_rate", profile.growth_rate),
        ("risk_factor", profile.risk_factor),
    ];

    for (field, value) in fields {
        if !value.is_finite() {
            errors.push(format!(
                "valuation.districts.{}.{}: must be a finite number",
                name, field
            ));
        } else if value < 0.0 {
            errors.push(format!(
                "valuation.districts.{}.{}: must be non-negative, got {}",
                name, field, value
            ));
        }
    }
}
