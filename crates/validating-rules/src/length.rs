//! # Length
//!
//! `length` bounds the size of strings (characters), arrays (items) and
//! objects (own keys). Anything else fails with the `invalid` message.

use validating_core::{
    ConfigError, Messages, OptionReader, Options, Outcome, Settings, Validator, Value,
};

use crate::Builtin;

/// What a measured value is, for picking the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    String,
    Array,
    Object,
}

impl Measure {
    fn of(value: &Value) -> Option<(Self, usize)> {
        match value {
            Value::String(s) => Some((Measure::String, s.chars().count())),
            Value::Array(items) => Some((Measure::Array, items.len())),
            Value::Object(object) => Some((Measure::Object, object.len())),
            Value::Date(_) => Some((Measure::Object, 0)),
            _ => None,
        }
    }

    fn too_short(self) -> &'static str {
        match self {
            Measure::String => "tooShortString",
            Measure::Array => "tooShortArray",
            Measure::Object => "tooShortObject",
        }
    }

    fn too_long(self) -> &'static str {
        match self {
            Measure::String => "tooLongString",
            Measure::Array => "tooLongArray",
            Measure::Object => "tooLongObject",
        }
    }
}

/// Size bounds; at least one of `min` and `max` is always set.
#[derive(Debug, Clone, PartialEq)]
pub struct Length {
    settings: Settings,
    min: Option<usize>,
    max: Option<usize>,
}

impl Length {
    /// A `length` validator with the given bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] when neither bound is set.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self, ConfigError> {
        if min.is_none() && max.is_none() {
            return Err(ConfigError::missing_option(Self::NAME, "min or max"));
        }
        Ok(Self::bounded(min, max))
    }

    /// At least `min`.
    pub fn at_least(min: usize) -> Self {
        Self::bounded(Some(min), None)
    }

    /// At most `max`.
    pub fn at_most(max: usize) -> Self {
        Self::bounded(None, Some(max))
    }

    /// Between `min` and `max` inclusive.
    pub fn between(min: usize, max: usize) -> Self {
        Self::bounded(Some(min), Some(max))
    }

    fn bounded(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            settings: Settings::new(Messages::new([
                ("invalid", "The value is invalid."),
                ("tooShortString", "Too short, should be at least {{min}} character(s)."),
                ("tooLongString", "Too long, should be at most {{max}} character(s)."),
                ("tooShortArray", "Too short, should contain at least {{min}} item(s)."),
                ("tooLongArray", "Too long, should contain at most {{max}} item(s)."),
                ("tooShortObject", "Too short, should contain at least {{min}} key(s)."),
                ("tooLongObject", "Too long, should contain at most {{max}} key(s)."),
            ])),
            min,
            max,
        }
    }

    /// Lower bound.
    pub fn min(&self) -> Option<usize> {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> Option<usize> {
        self.max
    }
}

impl Builtin for Length {
    const NAME: &'static str = "length";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let min = reader.count("min")?;
        let max = reader.count("max")?;
        let mut validator = Self::new(min, max)?;
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Length {
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
        match token {
            "min" => self.min.map(|n| n.to_string()),
            "max" => self.max.map(|n| n.to_string()),
            _ => None,
        }
    }

    fn check(&self, value: &Value) -> Outcome {
        let Some((measure, size)) = Measure::of(value) else {
            return self.fail("invalid");
        };
        if self.min.is_some_and(|min| size < min) {
            return self.fail(measure.too_short());
        }
        if self.max.is_some_and(|max| size > max) {
            return self.fail(measure.too_long());
        }
        Outcome::Valid
    }
}
