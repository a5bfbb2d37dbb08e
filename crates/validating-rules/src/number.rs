//! # Number
//!
//! `number` accepts numeric values other than `NaN`, optionally bounded.
//! Numeric strings are not coerced.

use validating_core::{
    ConfigError, Messages, OptionReader, Options, Outcome, Settings, Validator, Value,
};

use crate::Builtin;

/// A number within optional inclusive bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    settings: Settings,
    min: Option<f64>,
    max: Option<f64>,
}

impl Default for Number {
    fn default() -> Self {
        Self::new()
    }
}

impl Number {
    /// An unbounded `number` validator.
    pub fn new() -> Self {
        Self {
            settings: Settings::new(Messages::new([
                ("invalid", "Expected a number."),
                ("tooSmall", "Must be at least {{min}}."),
                ("tooLarge", "Must be at most {{max}}."),
            ])),
            min: None,
            max: None,
        }
    }

    /// Set the lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Lower bound.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> Option<f64> {
        self.max
    }
}

impl Builtin for Number {
    const NAME: &'static str = "number";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let mut validator = Self::new();
        validator.min = reader.number("min")?;
        validator.max = reader.number("max")?;
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Number {
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
        let bound = match token {
            "min" => self.min,
            "max" => self.max,
            _ => None,
        };
        bound.map(|n| Value::from(n).to_string())
    }

    fn check(&self, value: &Value) -> Outcome {
        let n = match value {
            Value::Number(n) if !n.is_nan() => *n,
            _ => return self.fail("invalid"),
        };
        if self.min.is_some_and(|min| n < min) {
            return self.fail("tooSmall");
        }
        if self.max.is_some_and(|max| n > max) {
            return self.fail("tooLarge");
        }
        Outcome::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let validator =
            Number::from_options(&Options::new().with("min", 3).with("max", 10)).unwrap();
        assert_eq!(validator.validate(&Value::from("nope")).error(), Some("Expected a number."));
        assert_eq!(
            validator.validate(&Value::from(f64::NAN)).error(),
            Some("Expected a number.")
        );
        assert_eq!(validator.validate(&Value::from(1)).error(), Some("Must be at least 3."));
        assert_eq!(validator.validate(&Value::from(11)).error(), Some("Must be at most 10."));
        for ok in [3, 5, 10] {
            assert!(validator.validate(&Value::from(ok)).is_valid(), "{ok}");
        }
    }

    #[test]
    fn test_no_string_coercion() {
        assert_eq!(
            Number::new().validate(&Value::from("5")).error(),
            Some("Expected a number.")
        );
    }

    #[test]
    fn test_unbounded_accepts_infinities() {
        let validator = Number::new();
        assert!(validator.validate(&Value::from(f64::INFINITY)).is_valid());
        assert!(validator.validate(&Value::from(-0.5)).is_valid());
    }

    #[test]
    fn test_zero_bound_applies() {
        let validator = Number::new().with_min(0.0);
        assert_eq!(validator.validate(&Value::from(-1)).error(), Some("Must be at least 0."));
        let validator = Number::new().with_max(1.5);
        assert_eq!(validator.validate(&Value::from(2)).error(), Some("Must be at most 1.5."));
    }

    #[test]
    fn test_rejects_non_numeric_bound() {
        assert!(matches!(
            Number::from_options(&Options::new().with("min", "3")).unwrap_err(),
            ConfigError::InvalidOption { .. }
        ));
    }
}
