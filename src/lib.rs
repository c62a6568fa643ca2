//! Property valuation by weighted multi-factor scoring.
//!
//! The [`valuation`] module holds the engine: factor scorers, the three
//! weighting strategies and result assembly. [`config`], [`input`] and
//! [`output`] support the `valuer` command-line tool.
//!
//! ```no_run
//! use property_valuer::valuation::{AlgorithmId, PropertyAttributes, ValuationEngine};
//!
//! let property = PropertyAttributes::new(105.0, "雨湖区")
//!     .with_layout("3室2厅")
//!     .with_decoration("精装")
//!     .with_average_price(8000.0);
//!
//! let result = ValuationEngine::new()
//!     .estimate_value(&property, AlgorithmId::Comprehensive)
//!     .unwrap();
//! println!("{} per m², confidence {}", result.estimated_price, result.confidence);
//! ```

pub mod config;
pub mod input;
pub mod output;
pub mod valuation;
