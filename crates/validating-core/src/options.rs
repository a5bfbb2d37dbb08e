//! # Validator Options
//!
//! [`Options`] is the untyped configuration a validator is created with:
//! string keys mapped to [`Value`]s, as found in rules such as
//! `["length", {"min": 3}]` or `{"name": "range", "between": [5, 10]}`.
//!
//! [`OptionReader`] converts those entries into typed fields. Every read
//! checks the value's type and reports a [`ConfigError`] naming the
//! validator and option; [`OptionReader::finish`] rejects any key that no
//! read consumed. `null` and `undefined` entries are treated as absent.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ConfigError;
use crate::value::{Object, Value};

/// Untyped validator configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Options {
    entries: BTreeMap<String, Value>,
}

impl Options {
    /// No options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Take the keys of an object as options.
    pub fn from_object(object: &Object) -> Self {
        object.iter().map(|(k, v)| (k, v.clone())).collect()
    }

    /// Parse options from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] if `json` is not an object.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ConfigError> {
        match json {
            serde_json::Value::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| (k.as_str(), Value::from(v)))
                .collect()),
            other => Err(ConfigError::InvalidRule(format!(
                "options must be an object, got {other}"
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

/// Typed, consuming view over [`Options`] for one validator.
#[derive(Debug)]
pub struct OptionReader<'a> {
    validator: &'a str,
    options: &'a Options,
    seen: BTreeSet<&'static str>,
}

impl<'a> OptionReader<'a> {
    /// Start reading `options` on behalf of `validator`.
    pub fn new(validator: &'a str, options: &'a Options) -> Self {
        Self {
            validator,
            options,
            seen: BTreeSet::new(),
        }
    }

    /// The validator these options configure.
    pub fn validator(&self) -> &str {
        self.validator
    }

    fn take(&mut self, key: &'static str) -> Option<&'a Value> {
        self.seen.insert(key);
        self.options.get(key).filter(|v| !v.is_nullish())
    }

    fn invalid(&self, key: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::invalid_option(self.validator, key, reason)
    }

    /// Read any value.
    pub fn value(&mut self, key: &'static str) -> Option<Value> {
        self.take(key).cloned()
    }

    /// Read a boolean.
    pub fn bool(&mut self, key: &'static str) -> Result<Option<bool>, ConfigError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.invalid(key, format!("expected a boolean, got {}", other.type_tag()))),
        }
    }

    /// Read a string.
    pub fn string(&mut self, key: &'static str) -> Result<Option<String>, ConfigError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.invalid(key, format!("expected a string, got {}", other.type_tag()))),
        }
    }

    /// Read a number; `NaN` is rejected.
    pub fn number(&mut self, key: &'static str) -> Result<Option<f64>, ConfigError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Number(n)) if !n.is_nan() => Ok(Some(*n)),
            Some(other) => Err(self.invalid(key, format!("expected a number, got {other}"))),
        }
    }

    /// Read a non-negative integer.
    pub fn count(&mut self, key: &'static str) -> Result<Option<usize>, ConfigError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Number(n)) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
                Ok(Some(*n as usize))
            }
            Some(other) => Err(self.invalid(key, format!("expected a non-negative integer, got {other}"))),
        }
    }

    /// Read an array.
    pub fn list(&mut self, key: &'static str) -> Result<Option<Vec<Value>>, ConfigError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.clone())),
            Some(other) => Err(self.invalid(key, format!("expected an array, got {}", other.type_tag()))),
        }
    }

    /// Read an array of strings.
    pub fn strings(&mut self, key: &'static str) -> Result<Option<Vec<String>>, ConfigError> {
        let Some(items) = self.list(key)? else {
            return Ok(None);
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(self.invalid(key, format!("expected only strings, found {}", other.type_tag()))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Read an object.
    pub fn object(&mut self, key: &'static str) -> Result<Option<&'a Object>, ConfigError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Object(object)) => Ok(Some(object)),
            Some(other) => Err(self.invalid(key, format!("expected an object, got {}", other.type_tag()))),
        }
    }

    /// Finish reading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOption`] for the first key no read
    /// consumed.
    pub fn finish(self) -> Result<(), ConfigError> {
        match self
            .options
            .iter()
            .map(|(k, _)| k)
            .find(|k| !self.seen.contains(*k))
        {
            Some(unknown) => Err(ConfigError::UnknownOption {
                validator: self.validator.to_string(),
                option: unknown.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_reads() {
        let options = Options::new()
            .with("min", 3)
            .with("strict", false)
            .with("type", "string")
            .with("schemes", Value::array(["http", "ftp"]));
        let mut reader = OptionReader::new("demo", &options);
        assert_eq!(reader.count("min").unwrap(), Some(3));
        assert_eq!(reader.bool("strict").unwrap(), Some(false));
        assert_eq!(reader.string("type").unwrap(), Some("string".to_string()));
        assert_eq!(
            reader.strings("schemes").unwrap(),
            Some(vec!["http".to_string(), "ftp".to_string()])
        );
        assert_eq!(reader.count("max").unwrap(), None);
        reader.finish().unwrap();
    }

    #[test]
    fn test_null_is_absent() {
        let options = Options::new().with("min", Value::Null);
        let mut reader = OptionReader::new("demo", &options);
        assert_eq!(reader.count("min").unwrap(), None);
        reader.finish().unwrap();
    }

    #[test]
    fn test_mistyped_option() {
        let options = Options::new().with("min", "three");
        let mut reader = OptionReader::new("length", &options);
        let err = reader.count("min").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { ref option, .. } if option == "min"));

        let options = Options::new().with("min", -1);
        let mut reader = OptionReader::new("length", &options);
        assert!(reader.count("min").is_err());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let options = Options::new().with("min", 1).with("mni", 2);
        let mut reader = OptionReader::new("length", &options);
        reader.count("min").unwrap();
        let err = reader.finish().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownOption {
                validator: "length".into(),
                option: "mni".into(),
            }
        );
    }

    #[test]
    fn test_from_json() {
        let options = Options::from_json(&json!({"min": 1, "pattern": "^a$"})).unwrap();
        assert_eq!(options.get("min"), Some(&Value::from(1)));
        assert!(Options::from_json(&json!([1])).is_err());
    }
}
