//! # Validators Subcommand
//!
//! Lists the validator names available to schema files.

use std::io::Write;

use anyhow::Result;

/// Execute the validators subcommand, printing to stdout.
pub fn run_validators() -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_validators_to(&mut out)
}

/// Print one registered validator name per line to `out`.
pub fn run_validators_to(out: &mut impl Write) -> Result<u8> {
    let registry = validating_schema::global().read();
    for name in registry.names() {
        writeln!(out, "{name}")?;
    }
    Ok(0)
}
