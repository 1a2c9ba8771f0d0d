//! Output formatting for lint results.

use anyhow::Result;
use chainlint_core::{LintResult, Severity};
use std::io::{self, Write};

use crate::OutputFormat;

/// Prints lint results to stdout in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write(&mut out, result, format)?;
    out.flush()?;
    Ok(())
}

/// Writes lint results in the specified format.
pub fn write(out: &mut impl Write, result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, result)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, result)?;
            writeln!(out)?;
        }
        OutputFormat::Compact => {
            for violation in &result.violations {
                writeln!(out, "{violation}")?;
            }
        }
    }
    Ok(())
}

fn write_text(out: &mut impl Write, result: &LintResult) -> io::Result<()> {
    for violation in &result.violations {
        writeln!(out, "{}", violation.format())?;
    }

    let (errors, warnings, infos) = result.count_by_severity();
    let summary = format!(
        "Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)",
        result.files_checked
    );

    let color = match worst(result) {
        Some(Severity::Error) => "\x1b[31m",
        Some(Severity::Warning) => "\x1b[33m",
        Some(Severity::Info) | None => "\x1b[32m",
    };
    writeln!(out, "{color}{summary}\x1b[0m")
}

fn worst(result: &LintResult) -> Option<Severity> {
    result.violations.iter().map(|v| v.severity).max()
}
