use serde::{Deserialize, Serialize};

use super::strategy::AlgorithmId;

/// Score at which the projected price equals the base price.
pub const BASELINE_SCORE: f64 = 50.0;

/// Base price per m² when the attributes carry no district average.
pub const DEFAULT_BASE_PRICE: f64 = 6000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBounds {
    pub min: f64,
    pub max: f64,
}

impl ConfidenceBounds {
    pub fn for_algorithm(algorithm: AlgorithmId) -> Self {
        let (min, max) = match algorithm {
            AlgorithmId::Comprehensive => (60.0, 95.0),
            AlgorithmId::Simple => (55.0, 90.0),
            AlgorithmId::Investment => (58.0, 92.0),
        };
        Self { min, max }
    }

    pub fn bound(&self, score: f64) -> f64 {
        score.clamp(self.min, self.max)
    }

    pub fn contains(&self, confidence: f64) -> bool {
        (self.min..=self.max).contains(&confidence)
    }
}

/// Largest base price per m² a config may set as its default.
pub const MAX_DEFAULT_BASE_PRICE: f64 = 1e12;

/// Each score point above or below the baseline moves the price by 1%.
///
/// `None` when the projected price does not fit an `i64`.
pub fn project_price(base_price: f64, final_score: f64) -> Option<i64> {
    let projected = (base_price * (1.0 + (final_score - BASELINE_SCORE) / 100.0)).round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if projected.is_finite() && projected >= i64::MIN as f64 && projected < i64::MAX as f64 {
        Some(projected as i64)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceTier {
    StronglyRecommend,
    Recommend,
    Cautious,
    NotRecommended,
}

impl AdviceTier {
    pub fn classify(confidence: f64) -> Self {
        if confidence >= 80.0 {
            AdviceTier::StronglyRecommend
        } else if confidence >= 65.0 {
            AdviceTier::Recommend
        } else if confidence >= 50.0 {
            AdviceTier::Cautious
        } else {
            AdviceTier::NotRecommended
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AdviceTier::StronglyRecommend => {
                "强烈推荐投资：该区域具有较高的投资价值和增长潜力，风险较低。"
            }
            AdviceTier::Recommend => "推荐投资：该区域具有较好的投资价值，适合中长期持有。",
            AdviceTier::Cautious => "谨慎投资：该区域投资价值一般，建议结合其他因素综合考虑。",
            AdviceTier::NotRecommended => "不推荐投资：该区域投资风险较高，建议谨慎考虑。",
        }
    }
}
