//! # validating-cli — Command-Line Front End
//!
//! Checks JSON and YAML documents against declarative schema files using
//! the process-wide validator registry.
//!
//! ## Subcommands
//!
//! - `check` — validate documents against a schema
//! - `validators` — list the registered validator names
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers return exit codes.
//! - Handlers write to an injectable writer so output is testable.

pub mod check;
pub mod validators;
