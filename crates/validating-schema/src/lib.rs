//! # validating-schema — Rule Resolution and Descriptor Compilation
//!
//! Turns declarative field descriptors into compiled validators:
//!
//! 1. **[`Rule`]** — a single rule in any accepted shape.
//! 2. **[`Registry`]** — named validator factories; resolves rules into
//!    configured validators. A process-wide instance lives behind
//!    [`global()`].
//! 3. **[`Schema`] / [`FieldDescriptor`]** — field name → rule list, built
//!    in code or loaded from JSON / YAML.
//! 4. **[`SchemaValidator`] / [`FieldValidator`]** — the compiled forms,
//!    producing [`Report`]s and [`FieldReport`]s.
//!
//! ```
//! use validating_core::{Object, Value};
//! use validating_schema::{FieldDescriptor, Registry, Rule, Schema};
//!
//! let schema = Schema::new()
//!     .field("name", FieldDescriptor::new([Rule::from("required")]))
//!     .field("email", FieldDescriptor::new(["email", "required"]));
//! let validator = Registry::with_builtins().compile_schema(&schema).unwrap();
//!
//! let report = validator.validate(&Value::from(Object::new().with("name", "Ada")));
//! assert!(!report.valid);
//! assert_eq!(report.errors["email"], "Cannot be empty.");
//! ```
//!
//! Compilation defaults to [`Aggregation::LastFailure`]. A field that
//! should report its first failing rule, such as a `null` name reporting
//! "Cannot be empty." ahead of a later `regexp` rule, is compiled with
//! [`Aggregation::FirstFailure`] through [`Registry::compile_schema_with`].
//!
//! ## Crate Policy
//!
//! - Resolution errors surface at compile time; compiled validators only
//!   ever produce reports.
//! - The registry is never consulted while a compiled validator runs.

pub mod compile;
pub mod document;
pub mod registry;
pub mod rule;

pub use compile::{Aggregation, FieldReport, FieldValidator, Report, SchemaValidator};
pub use document::{DocumentError, FieldDescriptor, Schema};
pub use registry::{compile_field, compile_schema, create, define, global, Factory, Registry};
pub use rule::Rule;
