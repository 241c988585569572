//! Error types for the PPh21 Withholding Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur before a calculation runs. The
//! calculation itself is total over validated inputs and never fails.

use thiserror::Error;

/// The main error type for the PPh21 Withholding Engine.
///
/// # Example
///
/// ```
/// use pph21_engine::error::EngineError;
///
/// let error = EngineError::InvalidStatus {
///     value: "X/9".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown taxpayer status: X/9");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The taxpayer status string is not one of the eight known codes.
    #[error("Unknown taxpayer status: {value}")]
    InvalidStatus {
        /// The rejected status string.
        value: String,
    },

    /// A monetary input could not be parsed as a non-negative amount.
    #[error("Invalid amount for '{field}': {value:?}")]
    InvalidAmount {
        /// The input field name (e.g., "salary").
        field: String,
        /// The raw value that was rejected.
        value: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value outside its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by caller input rather than server setup.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidStatus { .. } | EngineError::InvalidAmount { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_status_displays_value() {
        let error = EngineError::InvalidStatus {
            value: "X/9".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown taxpayer status: X/9");
    }

    #[test]
    fn test_invalid_amount_displays_field_and_value() {
        let error = EngineError::InvalidAmount {
            field: "salary".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid amount for 'salary': \"abc\"");
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/regulation.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/regulation.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "employer.jkk_rate".to_string(),
            message: "must be between 0 and 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value 'employer.jkk_rate': must be between 0 and 1"
        );
    }

    #[test]
    fn test_only_input_errors_are_client_errors() {
        assert!(
            EngineError::InvalidStatus {
                value: "K/4".to_string()
            }
            .is_client_error()
        );
        assert!(
            EngineError::InvalidAmount {
                field: "bonus".to_string(),
                value: "-1".to_string()
            }
            .is_client_error()
        );
        assert!(
            !EngineError::ConfigNotFound {
                path: "x".to_string()
            }
            .is_client_error()
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_status() -> EngineResult<()> {
            Err(EngineError::InvalidStatus {
                value: "TK/9".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_status()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
