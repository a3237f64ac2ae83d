//! Validate command - report structural issues in a REML document.

use crate::parser::{parse_reml, validate_reml, Severity};
use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

/// Run the validate command
pub fn run(file: PathBuf, json: bool, strict: bool) -> Result<()> {
    if !file.exists() {
        bail!("input file does not exist: {}", file.display());
    }

    let content = fs::read_to_string(&file)?;
    let schema = parse_reml(&content)?;
    let report = validate_reml(&schema);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for issue in &report.issues {
            println!("{}: {} ({})", issue.severity, issue.message, issue.path);
        }
        println!(
            "\n{} error(s), {} warning(s)",
            report.error_count(),
            report.warning_count()
        );
    }

    let failed = !report.valid || (strict && report.warning_count() > 0);
    if failed {
        std::process::exit(1);
    }

    Ok(())
}
