//! # Type Checks
//!
//! `type` compares the value's runtime type tag; `instanceOf` compares its
//! constructor against a class, by name or by class identity.

use std::sync::Arc;

use validating_core::{
    Class, ConfigError, Messages, OptionReader, Options, Outcome, Prototype, Settings, Validator,
    Value, DEFAULT_KEY,
};

use crate::Builtin;

const MISMATCH: &str = "Expected {{expected}}, got {{got}}.";

/// Passes when the value's type tag equals the configured type. The
/// special type `null` accepts exactly `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    settings: Settings,
    expected: String,
}

impl Default for Type {
    fn default() -> Self {
        Self::new("string")
    }
}

impl Type {
    /// A `type` validator for the given type tag.
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            settings: Settings::new(Messages::single(MISMATCH)),
            expected: expected.into(),
        }
    }

    /// The expected type tag.
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl Builtin for Type {
    const NAME: &'static str = "type";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let mut validator = match reader.string("type")? {
            Some(expected) => Self::new(expected),
            None => Self::default(),
        };
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Type {
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
        (token == "expected").then(|| self.expected.clone())
    }

    fn check(&self, value: &Value) -> Outcome {
        if self.expected == "null" && matches!(value, Value::Null) {
            return Outcome::Valid;
        }
        let got = value.type_tag();
        if got == self.expected {
            Outcome::Valid
        } else {
            self.fail_with(
                DEFAULT_KEY,
                &[("expected", self.expected.clone()), ("got", got.to_string())],
            )
        }
    }
}

/// The class an [`InstanceOf`] validator expects.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassRef {
    /// Matched against the value's own constructor name.
    Name(String),
    /// Matched by class identity, including subclasses.
    Class(Arc<Class>),
}

impl ClassRef {
    /// The expected constructor name.
    pub fn name(&self) -> &str {
        match self {
            ClassRef::Name(name) => name,
            ClassRef::Class(class) => class.name(),
        }
    }

    fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (ClassRef::Name(name), _) => value.constructor_name() == Some(name.as_str()),
            (ClassRef::Class(expected), Value::Object(object)) => match object.prototype() {
                Prototype::Instance(class) => class.is_a(expected),
                _ => false,
            },
            _ => false,
        }
    }
}

impl From<&str> for ClassRef {
    fn from(name: &str) -> Self {
        ClassRef::Name(name.to_string())
    }
}

impl From<String> for ClassRef {
    fn from(name: String) -> Self {
        ClassRef::Name(name)
    }
}

impl From<Arc<Class>> for ClassRef {
    fn from(class: Arc<Class>) -> Self {
        ClassRef::Class(class)
    }
}

impl From<&Arc<Class>> for ClassRef {
    fn from(class: &Arc<Class>) -> Self {
        ClassRef::Class(Arc::clone(class))
    }
}

/// Passes when the value is an instance of the configured class.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOf {
    settings: Settings,
    class: ClassRef,
}

impl InstanceOf {
    /// An `instanceOf` validator for a class name or class.
    pub fn new(class: impl Into<ClassRef>) -> Self {
        Self {
            settings: Settings::new(Messages::single(MISMATCH)),
            class: class.into(),
        }
    }

    /// The expected class.
    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    /// What the value actually is, for the failure message.
    fn describe(value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            other => other
                .constructor_name()
                .unwrap_or_else(|| other.type_tag())
                .to_string(),
        }
    }
}

impl Builtin for InstanceOf {
    const NAME: &'static str = "instanceOf";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let class = reader
            .string("class")?
            .ok_or_else(|| ConfigError::missing_option(Self::NAME, "class"))?;
        if class.is_empty() {
            return Err(ConfigError::invalid_option(
                Self::NAME,
                "class",
                "class name must not be empty",
            ));
        }
        let mut validator = Self::new(class);
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for InstanceOf {
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
        (token == "expected").then(|| self.class.name().to_string())
    }

    fn check(&self, value: &Value) -> Outcome {
        if self.class.admits(value) {
            Outcome::Valid
        } else {
            self.fail_with(
                DEFAULT_KEY,
                &[
                    ("expected", self.class.name().to_string()),
                    ("got", Self::describe(value)),
                ],
            )
        }
    }
}
