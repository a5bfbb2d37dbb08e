//! # Descriptor Compilation
//!
//! Compiles field descriptors into [`FieldValidator`]s and whole schemas
//! into [`SchemaValidator`]s. Every rule is resolved exactly once, at
//! compile time; the compiled validators never touch the registry again
//! and can be shared freely across threads.
//!
//! ## Aggregation
//!
//! A field's rules run in declaration order. Under
//! [`Aggregation::LastFailure`] every rule runs and the last failure's
//! message is reported; under [`Aggregation::FirstFailure`] evaluation stops
//! at the first failure.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use validating_core::{Outcome, ValidatingError, Validator, Value};

use crate::document::{FieldDescriptor, Schema};
use crate::registry::Registry;

/// How the failures of a field's rules combine into one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Run every rule; the last failure wins.
    #[default]
    LastFailure,
    /// Stop at the first failure.
    FirstFailure,
}

/// The verdict for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    /// True if no evaluated rule failed.
    pub valid: bool,
    /// The reported failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The verdict for a whole object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Report {
    /// True if no field failed.
    pub valid: bool,
    /// Failure message per failing field.
    pub errors: BTreeMap<String, String>,
}

/// A field's resolved rules.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    validators: Vec<Arc<dyn Validator>>,
    aggregation: Aggregation,
}

impl FieldValidator {
    /// Wrap already-resolved validators.
    pub fn new(validators: Vec<Arc<dyn Validator>>, aggregation: Aggregation) -> Self {
        Self {
            validators,
            aggregation,
        }
    }

    /// Run the rules against `value`.
    pub fn validate(&self, value: &Value) -> FieldReport {
        let mut error = None;
        for validator in &self.validators {
            if let Outcome::Invalid(message) = validator.validate(value) {
                error = Some(message);
                if self.aggregation == Aggregation::FirstFailure {
                    break;
                }
            }
        }
        FieldReport {
            valid: error.is_none(),
            error,
        }
    }

    /// The resolved validators, in evaluation order.
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// The aggregation policy.
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }
}

/// Compiled field validators keyed by field name, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    fields: Vec<(String, FieldValidator)>,
}

impl SchemaValidator {
    /// Validate an object. A missing field, or any field of a non-object
    /// input, is validated as `undefined`.
    pub fn validate(&self, object: &Value) -> Report {
        let mut report = Report {
            valid: true,
            errors: BTreeMap::new(),
        };
        for (field, validator) in &self.fields {
            if let Some(error) = validator.validate(object.get(field)).error {
                tracing::trace!(field = %field, error = %error, "field failed validation");
                report.valid = false;
                report.errors.insert(field.clone(), error);
            }
        }
        report
    }

    /// The compiled fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValidator)> {
        self.fields.iter().map(|(name, validator)| (name.as_str(), validator))
    }

    /// The compiled validator for `field`.
    pub fn field(&self, field: &str) -> Option<&FieldValidator> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, validator)| validator)
    }

    /// Number of compiled fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field has rules.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Registry {
    /// Compile a descriptor with the default aggregation.
    ///
    /// # Errors
    ///
    /// See [`Registry::compile_field_with`].
    pub fn compile_field(&self, descriptor: &FieldDescriptor) -> Result<Option<FieldValidator>, ValidatingError> {
        self.compile_field_with(descriptor, Aggregation::default())
    }

    /// Compile a descriptor. Returns `None` when it carries no rule list.
    ///
    /// # Errors
    ///
    /// Fails on the first rule that cannot be resolved.
    pub fn compile_field_with(
        &self,
        descriptor: &FieldDescriptor,
        aggregation: Aggregation,
    ) -> Result<Option<FieldValidator>, ValidatingError> {
        let Some(rules) = descriptor.rules() else {
            return Ok(None);
        };
        let validators = rules
            .iter()
            .map(|rule| self.resolve(rule))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(FieldValidator::new(validators, aggregation)))
    }

    /// Compile a schema with the default aggregation.
    ///
    /// # Errors
    ///
    /// See [`Registry::compile_schema_with`].
    pub fn compile_schema(&self, schema: &Schema) -> Result<SchemaValidator, ValidatingError> {
        self.compile_schema_with(schema, Aggregation::default())
    }

    /// Compile every field that carries a rule list.
    ///
    /// # Errors
    ///
    /// Fails on the first rule that cannot be resolved.
    pub fn compile_schema_with(
        &self,
        schema: &Schema,
        aggregation: Aggregation,
    ) -> Result<SchemaValidator, ValidatingError> {
        let mut fields = Vec::with_capacity(schema.len());
        for (name, descriptor) in schema.fields() {
            if let Some(validator) = self.compile_field_with(descriptor, aggregation)? {
                fields.push((name.to_string(), validator));
            }
        }
        tracing::debug!(
            declared = schema.len(),
            compiled = fields.len(),
            ?aggregation,
            "compiled schema"
        );
        Ok(SchemaValidator { fields })
    }
}
