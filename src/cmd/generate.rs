//! Generate command - emit a DDL script for a REML schema.

use crate::dialect::Dialect;
use crate::generator;
use crate::graph::TableGraph;
use crate::parser::{parse_reml, validate_reml};
use anyhow::{bail, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Run the generate command
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    dialect: Option<String>,
    check: bool,
    dry_run: bool,
) -> Result<()> {
    if !file.exists() {
        bail!("input file does not exist: {}", file.display());
    }

    let content = fs::read_to_string(&file)?;
    let schema = parse_reml(&content)?;

    let report = validate_reml(&schema);
    for warning in report.warnings() {
        eprintln!("warning: {} ({})", warning.message, warning.path);
    }
    if !report.valid {
        for error in report.errors() {
            eprintln!("error: {} ({})", error.message, error.path);
        }
        bail!(
            "schema validation failed with {} error(s)",
            report.error_count()
        );
    }

    if check {
        eprintln!(
            "Check PASSED: {} table(s), {} warning(s).",
            schema.tables.len(),
            report.warning_count()
        );
        return Ok(());
    }

    let target = resolve_dialect(&schema.database, dialect.as_deref());

    let graph = TableGraph::from_schema(&schema);
    let topo = graph.topo_sort();
    if !topo.cyclic_tables.is_empty() {
        eprintln!("\nWarning: Circular foreign key dependencies detected!");
        eprintln!("The following tables are part of cycles:");
        for name in &topo.cyclic_tables {
            eprintln!("  - {name}");
        }
        eprintln!("CREATE TABLE order inside a cycle is best effort.\n");
    }

    if dry_run {
        eprintln!("Emission order ({} tables):", topo.order.len());
        for (i, name) in topo.order.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, name);
        }
        return Ok(());
    }

    let sql = generator::generate(&schema, target);

    match output {
        Some(ref path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(sql.as_bytes())?;
            writer.flush()?;
            eprintln!("DDL written to: {}", path.display());
        }
        None => {
            println!("{sql}");
        }
    }

    Ok(())
}

/// Resolve the target dialect: the --dialect flag wins over the
/// document's `database` field. Unrecognized names fall back to the
/// PostgreSQL profile with a warning rather than failing.
fn resolve_dialect(document_dialect: &str, flag: Option<&str>) -> Dialect {
    let requested = flag.unwrap_or(document_dialect);
    if requested.is_empty() {
        return Dialect::Postgres;
    }
    match requested.parse() {
        Ok(dialect) => dialect,
        Err(_) => {
            eprintln!("warning: unknown dialect \"{requested}\", using postgresql");
            Dialect::Postgres
        }
    }
}
