//! # Check Subcommand
//!
//! Validates JSON / YAML documents against a schema file.
//!
//! ```bash
//! validating check --schema user.schema.yaml users/*.json
//! validating check --schema user.schema.json --format json --first-failure a.yaml
//! ```
//!
//! Exit codes: `0` when every document is valid, `2` when any document is
//! invalid. Load, parse and schema errors propagate to `main`, which exits
//! with `1`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use validating_core::Value;
use validating_schema::{Aggregation, Report, Schema};

/// Every document passed.
pub const EXIT_VALID: u8 = 0;
/// At least one document failed validation.
pub const EXIT_INVALID: u8 = 2;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub schema: PathBuf,

    /// Stop at the first failing rule of each field instead of reporting
    /// the last failure.
    #[arg(long)]
    pub first_failure: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Documents to validate.
    #[arg(required = true)]
    pub documents: Vec<PathBuf>,
}

/// How reports are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<document>: ok|invalid` followed by one line per failing field.
    Text,
    /// A JSON array with one report object per document.
    Json,
}

/// A report tagged with the document it belongs to.
#[derive(Debug, Serialize)]
struct DocumentReport<'a> {
    document: String,
    #[serde(flatten)]
    report: &'a Report,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("yaml" | "yml") => Ok(Format::Yaml),
        _ => bail!(
            "unsupported file type for {}: expected .json, .yaml or .yml",
            path.display()
        ),
    }
}

/// Read a JSON or YAML file, chosen by extension.
pub fn load_json(path: &Path) -> Result<serde_json::Value> {
    let format = format_of(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    match format {
        Format::Json => serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON in {}", path.display())),
        Format::Yaml => serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse YAML in {}", path.display())),
    }
}

/// Load and shape-check a schema file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let json = load_json(path)?;
    Schema::from_json(&json).with_context(|| format!("invalid schema in {}", path.display()))
}

/// Execute the check subcommand, printing to stdout.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_check_to(args, &mut out)
}

/// Execute the check subcommand, printing to `out`.
pub fn run_check_to(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let schema = load_schema(&args.schema)?;
    let aggregation = if args.first_failure {
        Aggregation::FirstFailure
    } else {
        Aggregation::LastFailure
    };
    let validator = validating_schema::global()
        .read()
        .compile_schema_with(&schema, aggregation)
        .with_context(|| format!("failed to compile schema {}", args.schema.display()))?;
    tracing::info!(
        schema = %args.schema.display(),
        fields = validator.len(),
        documents = args.documents.len(),
        "checking documents"
    );

    let mut reports = Vec::with_capacity(args.documents.len());
    for path in &args.documents {
        let document = Value::from(load_json(path)?);
        let report = validator.validate(&document);
        tracing::debug!(document = %path.display(), valid = report.valid, "validated document");
        reports.push((path.display().to_string(), report));
    }

    match args.format {
        OutputFormat::Text => {
            for (document, report) in &reports {
                if report.valid {
                    writeln!(out, "{document}: ok")?;
                } else {
                    writeln!(out, "{document}: invalid")?;
                    for (field, message) in &report.errors {
                        writeln!(out, "  {field}: {message}")?;
                    }
                }
            }
        }
        OutputFormat::Json => {
            let tagged: Vec<DocumentReport<'_>> = reports
                .iter()
                .map(|(document, report)| DocumentReport {
                    document: document.clone(),
                    report,
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &tagged)?;
            writeln!(out)?;
        }
    }

    if reports.iter().all(|(_, report)| report.valid) {
        Ok(EXIT_VALID)
    } else {
        Ok(EXIT_INVALID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA_YAML: &str = "\
name:
  label: Name
  rules:
    - required
    - [regexp, { pattern: '^[A-Za-z][A-Za-z0-9]*$' }]
email:
  rules:
    - { name: email }
    - { name: required }
";

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn args(schema: PathBuf, documents: Vec<PathBuf>, format: OutputFormat) -> CheckArgs {
        CheckArgs {
            schema,
            first_failure: true,
            format,
            documents,
        }
    }

    #[test]
    fn check_valid_document_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "user.yaml", SCHEMA_YAML);
        let doc = write(
            dir.path(),
            "admin.json",
            r#"{"name": "Admin", "email": "admin@example.com"}"#,
        );
        let mut out = Vec::new();
        let code = run_check_to(&args(schema, vec![doc.clone()], OutputFormat::Text), &mut out).unwrap();
        assert_eq!(code, EXIT_VALID);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{}: ok\n", doc.display()));
    }

    #[test]
    fn check_invalid_document_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "user.yaml", SCHEMA_YAML);
        let doc = write(dir.path(), "bad.yml", "name: null\nemail: nope\n");
        let mut out = Vec::new();
        let code = run_check_to(&args(schema, vec![doc.clone()], OutputFormat::Text), &mut out).unwrap();
        assert_eq!(code, EXIT_INVALID);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!(
                "{}: invalid\n  email: Not a valid email address.\n  name: Cannot be empty.\n",
                doc.display()
            )
        );
    }

    #[test]
    fn check_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "user.yaml", SCHEMA_YAML);
        let good = write(dir.path(), "good.json", r#"{"name": "Ada", "email": "ada@example.com"}"#);
        let bad = write(dir.path(), "bad.json", r#"{"name": "Ada"}"#);
        let mut out = Vec::new();
        let code = run_check_to(
            &args(schema, vec![good.clone(), bad.clone()], OutputFormat::Json),
            &mut out,
        )
        .unwrap();
        assert_eq!(code, EXIT_INVALID);
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {"document": good.display().to_string(), "valid": true, "errors": {}},
                {
                    "document": bad.display().to_string(),
                    "valid": false,
                    "errors": {"email": "Not a valid email address."}
                }
            ])
        );
    }

    #[test]
    fn check_last_failure_policy() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "user.yaml", SCHEMA_YAML);
        let doc = write(dir.path(), "empty.json", "{}");
        let mut check = args(schema, vec![doc], OutputFormat::Text);
        check.first_failure = false;
        let mut out = Vec::new();
        run_check_to(&check, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  email: Cannot be empty."));
        assert!(text.contains("  name: Should be a text value."));
    }

    #[test]
    fn check_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "user.yaml", SCHEMA_YAML);
        let doc = write(dir.path(), "doc.txt", "{}");
        let err = run_check_to(&args(schema, vec![doc], OutputFormat::Text), &mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    fn check_reports_unknown_validator() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "s.json", r#"{"name": {"rules": ["nonesuch"]}}"#);
        let doc = write(dir.path(), "d.json", "{}");
        let err = run_check_to(&args(schema, vec![doc], OutputFormat::Text), &mut Vec::new())
            .unwrap_err();
        assert!(format!("{err:#}").contains("validator not found: nonesuch"));
    }

    #[test]
    fn check_missing_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "user.yaml", SCHEMA_YAML);
        let missing = dir.path().join("missing.json");
        let err = run_check_to(&args(schema, vec![missing], OutputFormat::Text), &mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
