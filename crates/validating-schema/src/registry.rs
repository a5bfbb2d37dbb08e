//! # Validator Registry
//!
//! Maps validator names to factories. A factory turns untyped [`Options`]
//! into a configured validator; the registry is consulted only when rules
//! are resolved, never while compiled validators run.
//!
//! Two forms are offered:
//!
//! - Owned [`Registry`] values, for isolated sets of validators.
//! - A process-wide registry behind [`global()`], seeded with the built-in
//!   catalog. The free functions [`define`], [`create`], [`compile_field`]
//!   and [`compile_schema`] operate on it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use validating_core::{ConfigError, Custom, Options, Test, ValidatingError, Validator};

use crate::compile::{FieldValidator, SchemaValidator};
use crate::document::{FieldDescriptor, Schema};

/// Builds a configured validator from options.
pub type Factory = Arc<dyn Fn(&Options) -> Result<Box<dyn Validator>, ConfigError> + Send + Sync>;

/// Named validator factories.
#[derive(Clone, Default)]
pub struct Registry {
    factories: HashMap<String, Factory>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}

impl Registry {
    /// A registry with no validators.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the full built-in catalog.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (name, factory) in validating_rules::builtins() {
            registry.factories.insert(name.to_string(), Arc::new(factory));
        }
        tracing::debug!(validators = registry.factories.len(), "registry initialised with builtins");
        registry
    }

    /// Register `factory` under `name`, replacing any existing entry.
    pub fn define<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Options) -> Result<Box<dyn Validator>, ConfigError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            tracing::warn!(validator = %name, "replacing existing validator definition");
        } else {
            tracing::debug!(validator = %name, "defining validator");
        }
        self.factories.insert(name, Arc::new(factory));
    }

    /// Register a validator built from a default message and a boolean
    /// test. Instances accept the common options.
    pub fn define_custom(&mut self, name: impl Into<String>, message: impl Into<String>, test: Test) {
        let name = name.into();
        let message = message.into();
        let template = Custom::new(name.clone(), message).with_test(test);
        self.define(name, move |options: &Options| {
            let validator: Box<dyn Validator> = Box::new(template.clone().configure(options)?);
            Ok(validator)
        });
    }

    /// Instantiate the validator registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatingError::NotFound`] if `name` is not registered,
    /// or [`ValidatingError::Config`] if the options are rejected.
    pub fn create(&self, name: &str, options: &Options) -> Result<Box<dyn Validator>, ValidatingError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ValidatingError::NotFound(name.to_string()))?;
        Ok(factory(options)?)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

static GLOBAL: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::with_builtins()));

/// The process-wide registry, seeded with the built-in catalog.
pub fn global() -> &'static RwLock<Registry> {
    &GLOBAL
}

/// Register a factory in the process-wide registry.
pub fn define<F>(name: impl Into<String>, factory: F)
where
    F: Fn(&Options) -> Result<Box<dyn Validator>, ConfigError> + Send + Sync + 'static,
{
    global().write().define(name, factory);
}

/// Instantiate a validator from the process-wide registry.
///
/// # Errors
///
/// See [`Registry::create`].
pub fn create(name: &str, options: &Options) -> Result<Box<dyn Validator>, ValidatingError> {
    global().read().create(name, options)
}

/// Compile a field descriptor against the process-wide registry.
///
/// # Errors
///
/// See [`Registry::compile_field`].
pub fn compile_field(descriptor: &FieldDescriptor) -> Result<Option<FieldValidator>, ValidatingError> {
    global().read().compile_field(descriptor)
}

/// Compile a schema against the process-wide registry.
///
/// # Errors
///
/// See [`Registry::compile_schema`].
pub fn compile_schema(schema: &Schema) -> Result<SchemaValidator, ValidatingError> {
    global().read().compile_schema(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validating_core::{Outcome, Value};
    use validating_rules::{Builtin, Number};

    #[test]
    fn test_builtins_registered() {
        let registry = Registry::with_builtins();
        assert_eq!(registry.len(), 15);
        for name in ["required", "instanceOf", "datetime", "url"] {
            assert!(registry.contains(name), "{name}");
        }
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(Registry::empty().is_empty());
    }

    #[test]
    fn test_create_distinguishes_not_found() {
        let registry = Registry::with_builtins();
        assert!(registry.create("nonesuch", &Options::new()).unwrap_err().is_not_found());
        let err = registry
            .create("length", &Options::new())
            .unwrap_err();
        assert!(matches!(err, ValidatingError::Config(ConfigError::MissingOption { .. })));
    }

    #[test]
    fn test_define_replaces() {
        let mut registry = Registry::with_builtins();
        registry.define("number", |options: &Options| {
            let validator: Box<dyn Validator> =
                Box::new(Number::from_options(options)?.with_min(100.0));
            Ok(validator)
        });
        let validator = registry.create("number", &Options::new()).unwrap();
        assert_eq!(validator.validate(&Value::from(5)).error(), Some("Must be at least 100."));
        assert_eq!(registry.len(), 15);
    }

    #[test]
    fn test_define_custom() {
        let mut registry = Registry::empty();
        let test: Test = Arc::new(|value: &Value| value.as_str().is_some_and(|s| s.starts_with('#')));
        registry.define_custom("hashtag", "Must start with #.", test);

        let validator = registry.create("hashtag", &Options::new()).unwrap();
        assert_eq!(validator.name(), "hashtag");
        assert!(validator.validate(&Value::from("#rust")).is_valid());
        assert_eq!(validator.validate(&Value::from("rust")).error(), Some("Must start with #."));

        let lenient = registry
            .create("hashtag", &Options::new().with("allowEmpty", true).with("message", "Tag?"))
            .unwrap();
        assert!(lenient.validate(&Value::from("")).is_valid());
        assert_eq!(lenient.validate(&Value::from("x")).error(), Some("Tag?"));
    }

    #[test]
    fn test_global_registry() {
        define("globalOddOnly", |_: &Options| {
            let validator: Box<dyn Validator> = Box::new(validating_core::Inline::new(|value| {
                match value.as_f64() {
                    Some(n) if n % 2.0 == 1.0 => Outcome::Valid,
                    _ => Outcome::invalid("odd numbers only"),
                }
            }));
            Ok(validator)
        });
        assert!(global().read().contains("required"));
        let validator = create("globalOddOnly", &Options::new()).unwrap();
        assert!(validator.validate(&Value::from(3)).is_valid());
        assert!(!validator.validate(&Value::from(4)).is_valid());
    }
}
