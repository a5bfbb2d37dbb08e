//! # Presence
//!
//! `required`: the value must not be empty.

use validating_core::{
    ConfigError, Messages, OptionReader, Options, Outcome, Settings, Validator, Value, DEFAULT_KEY,
};

use crate::Builtin;

/// Fails for empty values: undefined, null, `""`, `[]` and keyless plain
/// or prototype-less objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Required {
    settings: Settings,
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Required {
    /// A `required` validator with the default message.
    pub fn new() -> Self {
        Self {
            settings: Settings::new(Messages::single("Cannot be empty.")),
        }
    }
}

impl Builtin for Required {
    const NAME: &'static str = "required";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut validator = Self::new();
        let mut reader = OptionReader::new(Self::NAME, options);
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Required {
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
        if self.is_empty(value) {
            self.fail(DEFAULT_KEY)
        } else {
            Outcome::Valid
        }
    }
}
