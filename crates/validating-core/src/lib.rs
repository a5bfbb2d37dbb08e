//! # validating-core — Foundational Types for the Validating Engine
//!
//! This crate is the leaf of the workspace. It defines the types every other
//! crate builds on:
//!
//! 1. **[`Value`]** — the dynamic input model (undefined, null, booleans,
//!    numbers including `NaN`, strings, arrays, plain / prototype-less /
//!    typed objects, and date-times).
//!
//! 2. **[`Validator`]** — the rule contract: emptiness, the allow-empty
//!    short-circuit, message templating and the `message` alias. [`Inline`]
//!    wraps a predicate; [`Custom`] builds a named validator from a message
//!    and a boolean test.
//!
//! 3. **[`Options`] / [`OptionReader`]** — untyped validator configuration
//!    and its typed, fail-fast reader.
//!
//! 4. **[`ValidatingError`] / [`ConfigError`]** — configuration and lookup
//!    errors. Validation failures are [`Outcome::Invalid`] data, never
//!    errors.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `validating-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests; constant regexes use `expect` in
//!   `LazyLock` initialisers only.

pub mod error;
pub mod message;
pub mod options;
pub mod validator;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{ConfigError, ValidatingError};
pub use message::{prepare, Messages, DEFAULT_KEY};
pub use options::{OptionReader, Options};
pub use validator::{Custom, Inline, Outcome, Predicate, Settings, Test, Validator, BASE_MESSAGE};
pub use value::{Class, Object, Prototype, Value};
