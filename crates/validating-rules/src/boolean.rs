//! # Boolean
//!
//! `boolean` accepts members of configurable true and false value lists.

use validating_core::{
    ConfigError, Messages, OptionReader, Options, Outcome, Settings, Validator, Value, DEFAULT_KEY,
};

use crate::Builtin;

/// Passes for any value strictly equal to a member of `true_values` or
/// `false_values`.
#[derive(Debug, Clone, PartialEq)]
pub struct Boolean {
    settings: Settings,
    true_values: Vec<Value>,
    false_values: Vec<Value>,
}

impl Default for Boolean {
    fn default() -> Self {
        Self::new()
    }
}

impl Boolean {
    /// Accepts exactly `true` and `false`.
    pub fn new() -> Self {
        Self {
            settings: Settings::new(Messages::single("Must be true or false.")),
            true_values: vec![Value::Bool(true)],
            false_values: vec![Value::Bool(false)],
        }
    }

    /// Replace the accepted true values.
    pub fn with_true_values(mut self, values: Vec<Value>) -> Self {
        self.true_values = values;
        self
    }

    /// Replace the accepted false values.
    pub fn with_false_values(mut self, values: Vec<Value>) -> Self {
        self.false_values = values;
        self
    }

    /// Returns true if `value` is one of the true values.
    pub fn is_true(&self, value: &Value) -> bool {
        self.true_values.iter().any(|v| v.strict_eq(value))
    }

    /// Returns true if `value` is one of the false values.
    pub fn is_false(&self, value: &Value) -> bool {
        self.false_values.iter().any(|v| v.strict_eq(value))
    }
}

impl Builtin for Boolean {
    const NAME: &'static str = "boolean";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let mut validator = Self::new();
        if let Some(values) = reader.list("trueValues")? {
            validator.true_values = values;
        }
        if let Some(values) = reader.list("falseValues")? {
            validator.false_values = values;
        }
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Boolean {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn check(&self, value: &Value) -> Outcome {
        if self.is_true(value) || self.is_false(value) {
            Outcome::Valid
        } else {
            self.fail(DEFAULT_KEY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = "Must be true or false.";

    #[test]
    fn test_defaults() {
        let validator = Boolean::new();
        assert!(validator.validate(&Value::from(true)).is_valid());
        assert!(validator.validate(&Value::from(false)).is_valid());
        for value in [Value::from(1), Value::from("true"), Value::Null] {
            assert_eq!(validator.validate(&value).error(), Some(MESSAGE), "{value:?}");
        }
    }

    #[test]
    fn test_custom_true_values() {
        let options = Options::new().with(
            "trueValues",
            Value::Array(vec![
                Value::from(true),
                Value::from(1),
                Value::from("1"),
                Value::from("true"),
            ]),
        );
        let validator = Boolean::from_options(&options).unwrap();
        for ok in [
            Value::from(true),
            Value::from(1),
            Value::from("1"),
            Value::from("true"),
            Value::from(false),
        ] {
            assert!(validator.validate(&ok).is_valid(), "{ok:?}");
        }
        assert!(validator.is_true(&Value::from("1")));
        assert_eq!(validator.validate(&Value::from(0)).error(), Some(MESSAGE));
        assert_eq!(validator.validate(&Value::from("yes")).error(), Some(MESSAGE));
    }

    #[test]
    fn test_false_values_builder() {
        let validator = Boolean::new().with_false_values(vec![Value::from(0), Value::from("no")]);
        assert!(validator.validate(&Value::from("no")).is_valid());
        assert!(validator.is_false(&Value::from(0)));
        assert_eq!(validator.validate(&Value::from(false)).error(), Some(MESSAGE));
    }
}
