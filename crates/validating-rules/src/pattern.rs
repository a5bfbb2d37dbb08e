//! # Regexp
//!
//! `regexp` matches text values against a regular expression compiled once
//! at construction.

use regex::Regex;
use validating_core::{
    ConfigError, Messages, OptionReader, Options, Outcome, Settings, Validator, Value, DEFAULT_KEY,
};

use crate::Builtin;

/// A text value matching a pattern. Without a pattern every text value
/// matches; non-text values always fail with `badType`.
#[derive(Debug, Clone)]
pub struct Regexp {
    settings: Settings,
    pattern: Option<Regex>,
}

impl Default for Regexp {
    fn default() -> Self {
        Self::any()
    }
}

impl Regexp {
    /// Match any text value.
    pub fn any() -> Self {
        Self {
            settings: Settings::new(Messages::new([
                (DEFAULT_KEY, "Does not match the required pattern."),
                ("badType", "Should be a text value."),
            ])),
            pattern: None,
        }
    }

    /// Match a compiled pattern.
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern: Some(pattern),
            ..Self::any()
        }
    }

    /// Compile and match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the pattern does not compile.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(Self::new)
            .map_err(|e| ConfigError::invalid_option(Self::NAME, "pattern", e.to_string()))
    }

    /// The pattern, if any.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

impl Builtin for Regexp {
    const NAME: &'static str = "regexp";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let mut validator = match reader.string("pattern")? {
            Some(pattern) => Self::parse(&pattern)?,
            None => Self::any(),
        };
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Regexp {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn reference(&self, token: &str) -> Option<String> {
        match (token, &self.pattern) {
            ("pattern", Some(pattern)) => Some(pattern.as_str().to_string()),
            _ => None,
        }
    }

    fn check(&self, value: &Value) -> Outcome {
        let Value::String(text) = value else {
            return self.fail("badType");
        };
        match &self.pattern {
            Some(pattern) if !pattern.is_match(text) => self.fail(DEFAULT_KEY),
            _ => Outcome::Valid,
        }
    }
}
