//! # validating CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use validating_cli::check::{run_check, CheckArgs};
use validating_cli::validators::run_validators;

/// Declarative validation of JSON and YAML documents.
#[derive(Parser, Debug)]
#[command(name = "validating", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate documents against a schema file.
    Check(CheckArgs),

    /// List the available validator names.
    Validators,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Validators => run_validators(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use validating_cli::check::OutputFormat;

    #[test]
    fn cli_parse_check_defaults() {
        let cli = Cli::try_parse_from(["validating", "check", "--schema", "s.yaml", "a.json"]).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.schema, PathBuf::from("s.yaml"));
        assert_eq!(args.documents, [PathBuf::from("a.json")]);
        assert!(!args.first_failure);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn cli_parse_check_all_flags() {
        let cli = Cli::try_parse_from([
            "validating",
            "-vv",
            "check",
            "--schema",
            "s.json",
            "--first-failure",
            "--format",
            "json",
            "a.json",
            "b.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert!(args.first_failure);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.documents.len(), 2);
    }

    #[test]
    fn cli_parse_check_requires_documents() {
        assert!(Cli::try_parse_from(["validating", "check", "--schema", "s.yaml"]).is_err());
        assert!(Cli::try_parse_from(["validating", "check", "a.json"]).is_err());
    }

    #[test]
    fn cli_parse_validators() {
        let cli = Cli::try_parse_from(["validating", "validators"]).unwrap();
        assert!(matches!(cli.command, Commands::Validators));
    }
}
