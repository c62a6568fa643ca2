pub mod attributes;
pub mod config;
pub mod engine;
pub mod error;
pub mod factors;
pub mod noise;
pub mod projection;
pub mod strategy;
pub mod tables;
pub mod validation;
pub mod weights;

pub use attributes::{NumberLike, PropertyAttributes, RawPropertyAttributes};
pub use config::ValuationConfig;
pub use engine::{estimate_value, ValuationEngine, ValuationResult};
pub use error::ValuationError;
pub use factors::{Factor, MarketAnalysis};
pub use noise::{MidpointNoise, NoiseMode, NoiseSource, SeededNoise};
pub use projection::{AdviceTier, ConfidenceBounds, DEFAULT_BASE_PRICE};
pub use strategy::{AlgorithmId, RiskAssessment, ScoreBreakdown, ValuationStrategy};
pub use tables::{DistrictProfile, LookupTables};
pub use validation::validate_valuation;
pub use weights::StrategyWeights;
