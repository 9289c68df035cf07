//! Error types for rig configuration

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating settings.
///
/// Math and interpolation calls never fail; they fall back to neutral values
/// on degenerate input. Only configuration goes through this type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RigError {
    /// A settings field holds a value the solver cannot use
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting { field: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl RigError {
    pub fn invalid_setting(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidSetting { .. } => "validation",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for RigError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let invalid = RigError::invalid_setting("smoothing_angle", "must be positive");
        assert_eq!(invalid.category(), "validation");
        assert_eq!(
            invalid.to_string(),
            "Invalid setting `smoothing_angle`: must be positive"
        );

        let parse: RigError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(parse.category(), "serialization");
    }
}
