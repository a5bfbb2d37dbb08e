//! # Error Types — Configuration vs. Lookup Failures
//!
//! Defines the error types used throughout the validating engine. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Validation failures are NOT errors. A value that fails a rule produces
//!   [`Outcome::Invalid`](crate::Outcome::Invalid) data and never reaches
//!   these types.
//! - Configuration errors describe misuse of the API: a missing or mistyped
//!   option, a malformed rule, descriptor or schema. They are raised when a
//!   validator is constructed or a schema is compiled, never at call time.
//! - A registry miss is reported separately from configuration errors so
//!   callers can tell "unknown validator" apart from "bad options".

use thiserror::Error;

/// Top-level error type for the validating engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidatingError {
    /// No validator is registered under the requested name.
    #[error("validator not found: {0}")]
    NotFound(String),

    /// A validator, rule, descriptor or schema was misconfigured.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ValidatingError {
    /// Returns true if this error is a registry miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A contract violation detected while configuring a validator or
/// compiling a schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required option was not supplied.
    #[error("{validator}: missing required option `{option}`")]
    MissingOption {
        /// Registry name of the validator being configured.
        validator: String,
        /// The missing option key.
        option: String,
    },

    /// An option was supplied with the wrong type or an unusable value.
    #[error("{validator}: invalid option `{option}`: {reason}")]
    InvalidOption {
        /// Registry name of the validator being configured.
        validator: String,
        /// The offending option key.
        option: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An option key the validator does not understand.
    #[error("{validator}: unknown option `{option}`")]
    UnknownOption {
        /// Registry name of the validator being configured.
        validator: String,
        /// The unrecognised option key.
        option: String,
    },

    /// A list or map rule did not carry a validator name.
    #[error("validator name must be specified")]
    MissingName,

    /// A rule has an unsupported shape.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// A field descriptor has an unsupported shape.
    #[error("invalid descriptor for field `{field}`: {reason}")]
    InvalidDescriptor {
        /// Field the descriptor belongs to.
        field: String,
        /// Why the descriptor was rejected.
        reason: String,
    },

    /// The schema itself is not a field-name → descriptor mapping.
    #[error("schema must be an object, got {0}")]
    InvalidSchema(String),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidOption`].
    pub fn invalid_option(
        validator: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            validator: validator.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ConfigError::MissingOption`].
    pub fn missing_option(validator: impl Into<String>, option: impl Into<String>) -> Self {
        Self::MissingOption {
            validator: validator.into(),
            option: option.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_into_top_level() {
        let err: ValidatingError = ConfigError::MissingName.into();
        assert!(matches!(err, ValidatingError::Config(ConfigError::MissingName)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_formats() {
        let err = ConfigError::missing_option("length", "min");
        assert_eq!(err.to_string(), "length: missing required option `min`");

        let err = ValidatingError::NotFound("nope".into());
        assert_eq!(err.to_string(), "validator not found: nope");
        assert!(err.is_not_found());
    }
}
