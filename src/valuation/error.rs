use thiserror::Error;

/// Errors raised by a valuation call or by engine construction.
///
/// A failed call never produces a partial `ValuationResult`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValuationError {
    /// A property attribute is missing, unparseable or out of range.
    #[error("invalid attribute `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The requested algorithm id names no known strategy.
    #[error("invalid valuation algorithm: {0}")]
    InvalidAlgorithm(String),

    /// Engine configuration was rejected; every problem is listed.
    #[error("invalid valuation config: {}", .0.join("; "))]
    Config(Vec<String>),
}

impl ValuationError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        ValuationError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending attribute for validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValuationError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValuationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = ValuationError::validation("area", "must be positive");
        assert_eq!(err.to_string(), "invalid attribute `area`: must be positive");
        assert_eq!(err.field(), Some("area"));
    }

    #[test]
    fn test_config_message_joins_problems() {
        let err = ValuationError::Config(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "invalid valuation config: a; b");
        assert_eq!(err.field(), None);
    }
}
