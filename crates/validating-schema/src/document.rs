//! # Schema Documents
//!
//! A [`Schema`] maps field names to [`FieldDescriptor`]s. Schemas are built
//! in code or loaded from JSON / YAML documents of the form:
//!
//! ```yaml
//! name:
//!   label: Name
//!   rules:
//!     - required
//!     - [regexp, { pattern: "^[A-Z]" }]
//! email:
//!   rules:
//!     - { name: email, allowEmpty: true }
//! ```
//!
//! Descriptor keys other than `rules` are metadata and ignored. A
//! descriptor whose `rules` is absent or not a list has no rules.

use thiserror::Error;
use validating_core::ConfigError;

use crate::rule::Rule;

/// Failure to load a schema document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text is not valid JSON.
    #[error("invalid JSON schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is not valid YAML.
    #[error("invalid YAML schema document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but does not describe a schema.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A field's rule list. Without a list the field is not validated.
#[derive(Debug, Clone, Default)]
pub struct FieldDescriptor {
    rules: Option<Vec<Rule>>,
}

impl FieldDescriptor {
    /// A descriptor with the given rules.
    pub fn new<I, R>(rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        Self {
            rules: Some(rules.into_iter().map(Into::into).collect()),
        }
    }

    /// A descriptor without a rule list.
    pub fn without_rules() -> Self {
        Self::default()
    }

    /// The rule list, if any.
    pub fn rules(&self) -> Option<&[Rule]> {
        self.rules.as_deref()
    }

    /// Read the descriptor of `field` from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDescriptor`] if `json` is not an object,
    /// or the error of the first malformed rule.
    pub fn from_json(field: &str, json: &serde_json::Value) -> Result<Self, ConfigError> {
        let serde_json::Value::Object(map) = json else {
            return Err(ConfigError::InvalidDescriptor {
                field: field.to_string(),
                reason: format!("expected an object, got {json}"),
            });
        };
        match map.get("rules") {
            Some(serde_json::Value::Array(rules)) => Ok(Self {
                rules: Some(rules.iter().map(Rule::from_json).collect::<Result<_, _>>()?),
            }),
            _ => Ok(Self::without_rules()),
        }
    }
}

/// Field descriptors in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldDescriptor)>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Schema::insert`].
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    /// Add a field, replacing an existing descriptor of the same name in
    /// place.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: FieldDescriptor) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = descriptor,
            None => self.fields.push((name, descriptor)),
        }
    }

    /// The descriptor of `name`.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, descriptor)| descriptor)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read a schema from a JSON object of field descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSchema`] for a non-object document, or
    /// the error of the first malformed descriptor.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ConfigError> {
        let serde_json::Value::Object(map) = json else {
            return Err(ConfigError::InvalidSchema(json.to_string()));
        };
        let mut schema = Self::new();
        for (field, descriptor) in map {
            schema.insert(field.as_str(), FieldDescriptor::from_json(field, descriptor)?);
        }
        Ok(schema)
    }

    /// Parse a JSON schema document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] on a syntax or shape error.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from_json(&json)?)
    }

    /// Parse a YAML schema document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] on a syntax or shape error.
    pub fn from_yaml_str(text: &str) -> Result<Self, DocumentError> {
        let json: serde_json::Value = serde_yaml::from_str(text)?;
        Ok(Self::from_json(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_shapes() {
        let schema = Schema::from_json(&json!({
            "name": {"label": "Name", "rules": ["required", ["length", {"max": 10}]]},
            "notes": {"label": "Notes"},
            "tags": {"rules": "required"},
        }))
        .unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.get("name").and_then(FieldDescriptor::rules).map(<[Rule]>::len), Some(2));
        assert!(schema.get("notes").unwrap().rules().is_none());
        assert!(schema.get("tags").unwrap().rules().is_none());
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert!(matches!(
            Schema::from_json(&json!(["name"])).unwrap_err(),
            ConfigError::InvalidSchema(_)
        ));
        assert!(matches!(
            Schema::from_json(&json!({"name": "required"})).unwrap_err(),
            ConfigError::InvalidDescriptor { ref field, .. } if field == "name"
        ));
        assert!(matches!(
            Schema::from_json(&json!({"name": {"rules": [7]}})).unwrap_err(),
            ConfigError::InvalidRule(_)
        ));
    }

    #[test]
    fn test_from_yaml_str() {
        let schema = Schema::from_yaml_str(
            "name:\n  rules:\n    - required\n    - [regexp, { pattern: '^[A-Z]' }]\nemail:\n  rules:\n    - { name: email }\n",
        )
        .unwrap();
        let names: Vec<&str> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"name") && names.contains(&"email"));
    }

    #[test]
    fn test_from_str_errors() {
        assert!(matches!(
            Schema::from_json_str("{not json").unwrap_err(),
            DocumentError::Json(_)
        ));
        assert!(matches!(
            Schema::from_yaml_str("- a\n- b\n").unwrap_err(),
            DocumentError::Config(ConfigError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut schema = Schema::new()
            .field("a", FieldDescriptor::without_rules())
            .field("b", FieldDescriptor::without_rules());
        schema.insert("a", FieldDescriptor::new(["required"]));
        let names: Vec<&str> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(schema.get("a").unwrap().rules().is_some());
    }
}
