//! # Rule Shapes
//!
//! A [`Rule`] is one entry of a field's rule list, in any of the accepted
//! shapes:
//!
//! - an inline predicate,
//! - a bare validator name: `"required"`,
//! - a name/options pair: `["length", {"min": 3}]`,
//! - a map with a `name` key: `{"name": "length", "min": 3}`.
//!
//! [`Registry::resolve`] turns a rule into a configured validator. Rules
//! are resolved once, when a descriptor is compiled.

use std::fmt;
use std::sync::Arc;

use validating_core::{
    ConfigError, Inline, Object, Options, Outcome, Predicate, ValidatingError, Validator, Value,
};

use crate::registry::Registry;

/// One entry of a field's rule list.
#[derive(Clone)]
pub enum Rule {
    /// A predicate evaluated as-is.
    Inline(Predicate),
    /// A validator name with default options.
    Name(String),
    /// `[name]` or `[name, options]`.
    List(Vec<Value>),
    /// Options carrying the validator name under `name`.
    Map(Options),
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Inline(_) => f.write_str("Inline(..)"),
            Rule::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Rule::List(items) => f.debug_tuple("List").field(items).finish(),
            Rule::Map(options) => f.debug_tuple("Map").field(options).finish(),
        }
    }
}

impl Rule {
    /// A bare validator name.
    pub fn named(name: impl Into<String>) -> Self {
        Rule::Name(name.into())
    }

    /// A validator name with options, in map form.
    pub fn with(name: impl Into<String>, options: Options) -> Self {
        let name: String = name.into();
        Rule::Map(options.with("name", name))
    }

    /// An inline predicate.
    pub fn inline<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> Outcome + Send + Sync + 'static,
    {
        Rule::Inline(Arc::new(predicate))
    }

    /// Read a rule from JSON: strings are names, arrays are name/options
    /// pairs and objects are maps.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] for any other JSON type.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ConfigError> {
        match json {
            serde_json::Value::String(name) => Ok(Rule::Name(name.clone())),
            serde_json::Value::Array(items) => Ok(Rule::List(items.iter().map(Value::from).collect())),
            serde_json::Value::Object(_) => Options::from_json(json).map(Rule::Map),
            other => Err(ConfigError::InvalidRule(format!(
                "expected a name, list or map, got {other}"
            ))),
        }
    }

    /// The validator name and options this rule refers to. Inline rules
    /// have neither.
    fn split(&self) -> Result<Option<(String, Options)>, ConfigError> {
        match self {
            Rule::Inline(_) => Ok(None),
            Rule::Name(name) => {
                if name.is_empty() {
                    return Err(ConfigError::MissingName);
                }
                Ok(Some((name.clone(), Options::new())))
            }
            Rule::List(items) => {
                let name = match items.first() {
                    Some(Value::String(name)) if !name.is_empty() => name.clone(),
                    _ => return Err(ConfigError::MissingName),
                };
                let options = match &items[1..] {
                    [] => Options::new(),
                    [Value::Object(object)] => Options::from_object(object),
                    [other] => {
                        return Err(ConfigError::InvalidRule(format!(
                            "options for `{name}` must be an object, got {}",
                            other.type_tag()
                        )))
                    }
                    _ => {
                        return Err(ConfigError::InvalidRule(format!(
                            "`{name}` rule has {} elements, expected at most 2",
                            items.len()
                        )))
                    }
                };
                Ok(Some((name, options)))
            }
            Rule::Map(options) => {
                let name = match options.get("name") {
                    Some(Value::String(name)) if !name.is_empty() => name.clone(),
                    _ => return Err(ConfigError::MissingName),
                };
                let mut options = options.clone();
                options.remove("name");
                Ok(Some((name, options)))
            }
        }
    }
}

impl From<&str> for Rule {
    fn from(name: &str) -> Self {
        Rule::named(name)
    }
}

impl From<String> for Rule {
    fn from(name: String) -> Self {
        Rule::Name(name)
    }
}

impl From<Object> for Rule {
    fn from(object: Object) -> Self {
        Rule::Map(Options::from_object(&object))
    }
}

impl From<Predicate> for Rule {
    fn from(predicate: Predicate) -> Self {
        Rule::Inline(predicate)
    }
}

impl Registry {
    /// Resolve a rule into a configured validator.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatingError::NotFound`] for an unregistered name and
    /// [`ValidatingError::Config`] for a malformed rule or bad options.
    pub fn resolve(&self, rule: &Rule) -> Result<Arc<dyn Validator>, ValidatingError> {
        if let Rule::Inline(predicate) = rule {
            let inline: Arc<dyn Validator> = Arc::new(Inline::from_predicate(Arc::clone(predicate)));
            return Ok(inline);
        }
        let (name, options) = rule.split()?.ok_or(ConfigError::MissingName)?;
        self.create(&name, &options).map(Arc::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Registry {
        Registry::with_builtins()
    }

    #[test]
    fn test_resolve_name() {
        let validator = registry().resolve(&Rule::from("required")).unwrap();
        assert_eq!(validator.name(), "required");
        assert!(!validator.validate(&Value::Null).is_valid());
    }

    #[test]
    fn test_resolve_list_with_options() {
        let rule = Rule::from_json(&json!(["length", {"min": 3}])).unwrap();
        let validator = registry().resolve(&rule).unwrap();
        assert_eq!(
            validator.validate(&Value::from("ab")).error(),
            Some("Too short, should be at least 3 character(s).")
        );
    }

    #[test]
    fn test_resolve_map() {
        let rule = Rule::from_json(&json!({"name": "range", "between": [5, 10]})).unwrap();
        let validator = registry().resolve(&rule).unwrap();
        assert_eq!(validator.name(), "range");
        assert_eq!(
            validator.validate(&Value::from(11)).error(),
            Some("Must be between 5 and 10.")
        );

        let rule = Rule::with("number", Options::new().with("max", 1));
        assert!(!registry().resolve(&rule).unwrap().validate(&Value::from(2)).is_valid());
    }

    #[test]
    fn test_resolve_inline_skips_allow_empty() {
        let rule = Rule::inline(|value| {
            if value.is_nullish() {
                Outcome::invalid("no nulls")
            } else {
                Outcome::Valid
            }
        });
        let validator = registry().resolve(&rule).unwrap();
        assert_eq!(validator.validate(&Value::Null).error(), Some("no nulls"));
        assert!(validator.validate(&Value::from(1)).is_valid());
    }

    #[test]
    fn test_missing_names() {
        for rule in [
            Rule::from_json(&json!([])).unwrap(),
            Rule::from_json(&json!([42])).unwrap(),
            Rule::from_json(&json!({"min": 3})).unwrap(),
            Rule::from_json(&json!({"name": ""})).unwrap(),
            Rule::from(""),
        ] {
            assert_eq!(
                registry().resolve(&rule).unwrap_err(),
                ValidatingError::Config(ConfigError::MissingName),
                "{rule:?}"
            );
        }
    }

    #[test]
    fn test_malformed_lists() {
        let rule = Rule::from_json(&json!(["length", 3])).unwrap();
        assert!(matches!(
            registry().resolve(&rule).unwrap_err(),
            ValidatingError::Config(ConfigError::InvalidRule(_))
        ));
        let rule = Rule::from_json(&json!(["length", {"min": 1}, {"max": 2}])).unwrap();
        assert!(matches!(
            registry().resolve(&rule).unwrap_err(),
            ValidatingError::Config(ConfigError::InvalidRule(_))
        ));
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let err = registry().resolve(&Rule::from("nonesuch")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err, ValidatingError::NotFound("nonesuch".into()));
    }

    #[test]
    fn test_bad_options_are_config_errors() {
        let rule = Rule::from_json(&json!(["length", {"min": "three"}])).unwrap();
        let err = registry().resolve(&rule).unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(err, ValidatingError::Config(ConfigError::InvalidOption { .. })));
    }

    #[test]
    fn test_from_json_rejects_scalars() {
        assert!(matches!(
            Rule::from_json(&json!(42)).unwrap_err(),
            ConfigError::InvalidRule(_)
        ));
        assert!(Rule::from_json(&json!(null)).is_err());
    }
}
