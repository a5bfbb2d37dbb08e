//! # The Validator Contract
//!
//! Every rule implementation (built-in, custom or inline) implements
//! [`Validator`]. The trait supplies the shared behaviour:
//!
//! - **Emptiness.** [`Validator::is_empty`] follows [`Value::is_empty`].
//! - **Allow-empty short-circuit.** The provided [`Validator::validate`]
//!   returns [`Outcome::Valid`] for an empty value when `allowEmpty` is set,
//!   before the rule-specific [`Validator::check`] runs.
//! - **Message templating.** [`Validator::prepare`] fills `{{token}}`
//!   placeholders from the validator's own configuration via
//!   [`Validator::reference`].
//! - **Message alias.** [`Validator::message`] / [`Validator::set_message`]
//!   read and write the `default` slot of the message map.
//!
//! Validation never mutates the validator; a validator shared behind an
//! `Arc` can be called from any number of threads.

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::message::{self, Messages};
use crate::options::{OptionReader, Options};
use crate::value::Value;

/// Default message of a validator that defines none of its own.
pub const BASE_MESSAGE: &str = "Invalid value.";

/// The verdict of a single validation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The value satisfies the rule.
    Valid,
    /// The value violates the rule; carries the prepared message.
    Invalid(String),
}

impl Outcome {
    /// Build an invalid outcome.
    pub fn invalid(message: impl Into<String>) -> Self {
        Outcome::Invalid(message.into())
    }

    /// Returns true for [`Outcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid)
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Valid => None,
            Outcome::Invalid(message) => Some(message),
        }
    }

    /// Consume into the failure message, if any.
    pub fn into_error(self) -> Option<String> {
        match self {
            Outcome::Valid => None,
            Outcome::Invalid(message) => Some(message),
        }
    }
}

impl From<Result<(), String>> for Outcome {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Outcome::Valid,
            Err(message) => Outcome::Invalid(message),
        }
    }
}

impl From<Outcome> for Result<(), String> {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Valid => Ok(()),
            Outcome::Invalid(message) => Err(message),
        }
    }
}

/// Configuration shared by every validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Message key → template.
    pub messages: Messages,
    /// Accept empty values without running the rule.
    pub allow_empty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(Messages::single(BASE_MESSAGE))
    }
}

impl Settings {
    /// Settings with the given messages and `allow_empty = false`.
    pub fn new(messages: Messages) -> Self {
        Self {
            messages,
            allow_empty: false,
        }
    }

    /// Apply the common options: `allowEmpty`, `message` and `messages`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if any of them is mistyped.
    pub fn configure(&mut self, reader: &mut OptionReader<'_>) -> Result<(), ConfigError> {
        if let Some(allow_empty) = reader.bool("allowEmpty")? {
            self.allow_empty = allow_empty;
        }
        if let Some(overrides) = reader.object("messages")? {
            for (key, template) in overrides.iter() {
                let Value::String(template) = template else {
                    return Err(ConfigError::invalid_option(
                        reader.validator(),
                        "messages",
                        format!("message `{key}` must be a string"),
                    ));
                };
                self.messages.set(key, template.as_str());
            }
        }
        if let Some(message) = reader.string("message")? {
            self.messages.set_default_message(message);
        }
        Ok(())
    }
}

/// The contract every rule implementation satisfies.
pub trait Validator: fmt::Debug + Send + Sync {
    /// The name the validator is registered under.
    fn name(&self) -> &str;

    /// Shared configuration.
    fn settings(&self) -> &Settings;

    /// Mutable shared configuration.
    fn settings_mut(&mut self) -> &mut Settings;

    /// The rule-specific check, run after the allow-empty short-circuit.
    fn check(&self, value: &Value) -> Outcome;

    /// Validate `value`.
    fn validate(&self, value: &Value) -> Outcome {
        if self.settings().allow_empty && self.is_empty(value) {
            return Outcome::Valid;
        }
        self.check(value)
    }

    /// Whether `value` counts as empty.
    fn is_empty(&self, value: &Value) -> bool {
        value.is_empty()
    }

    /// Whether empty values are accepted.
    fn allow_empty(&self) -> bool {
        self.settings().allow_empty
    }

    /// Accept or reject empty values.
    fn set_allow_empty(&mut self, allow_empty: bool) {
        self.settings_mut().allow_empty = allow_empty;
    }

    /// The `default` message template.
    fn message(&self) -> &str {
        self.settings().messages.default_message()
    }

    /// Overwrite the `default` message template.
    fn set_message(&mut self, template: &str) {
        self.settings_mut().messages.set_default_message(template);
    }

    /// The stringified configuration field named `token`, used when a
    /// template is prepared without explicit references.
    fn reference(&self, _token: &str) -> Option<String> {
        None
    }

    /// Fill `template` from the validator's own configuration.
    fn prepare(&self, template: &str) -> String {
        message::prepare(template, |token| self.reference(token))
    }

    /// Fill `template` from explicit references.
    fn prepare_with(&self, template: &str, references: &[(&str, String)]) -> String {
        message::prepare(template, |token| {
            references
                .iter()
                .find(|(key, _)| *key == token)
                .map(|(_, value)| value.clone())
        })
    }

    /// Fail with the message stored under `key`.
    fn fail(&self, key: &str) -> Outcome {
        Outcome::Invalid(self.prepare(self.settings().messages.get(key)))
    }

    /// Fail with the message stored under `key`, filled from `references`.
    fn fail_with(&self, key: &str, references: &[(&str, String)]) -> Outcome {
        Outcome::Invalid(self.prepare_with(self.settings().messages.get(key), references))
    }
}

/// A predicate used as a rule: returns the outcome directly.
pub type Predicate = Arc<dyn Fn(&Value) -> Outcome + Send + Sync>;

/// A boolean test behind a [`Custom`] validator.
pub type Test = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Wraps an inline predicate. Its `validate` is exactly the predicate: no
/// allow-empty short-circuit applies.
#[derive(Clone)]
pub struct Inline {
    settings: Settings,
    predicate: Predicate,
}

impl fmt::Debug for Inline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inline")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Inline {
    /// Wrap a closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> Outcome + Send + Sync + 'static,
    {
        Self::from_predicate(Arc::new(predicate))
    }

    /// Wrap a shared predicate.
    pub fn from_predicate(predicate: Predicate) -> Self {
        Self {
            settings: Settings::default(),
            predicate,
        }
    }
}

impl Validator for Inline {
    fn name(&self) -> &str {
        "inline"
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn check(&self, value: &Value) -> Outcome {
        (self.predicate)(value)
    }

    fn validate(&self, value: &Value) -> Outcome {
        (self.predicate)(value)
    }
}

/// A named validator defined from a default message and a boolean test.
/// Without a test it accepts every value.
#[derive(Clone)]
pub struct Custom {
    name: String,
    settings: Settings,
    test: Option<Test>,
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .field("has_test", &self.test.is_some())
            .finish()
    }
}

impl Custom {
    /// A custom validator that accepts everything.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Settings::new(Messages::single(message)),
            test: None,
        }
    }

    /// Attach the boolean test.
    pub fn with_test(mut self, test: Test) -> Self {
        self.test = Some(test);
        self
    }

    /// Apply the common options.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for mistyped or unknown options.
    pub fn configure(mut self, options: &Options) -> Result<Self, ConfigError> {
        let name = self.name.clone();
        let mut reader = OptionReader::new(&name, options);
        self.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(self)
    }
}

impl Validator for Custom {
    fn name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn check(&self, value: &Value) -> Outcome {
        match &self.test {
            Some(test) if !test(value) => self.fail(message::DEFAULT_KEY),
            _ => Outcome::Valid,
        }
    }
}
