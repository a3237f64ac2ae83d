//! REML document parsing and lenient structural validation.
//!
//! Validation is minimal by design: only the fields the generator
//! genuinely depends on are checked (`reml`, `database`, at least one
//! table, at least one column per table, a `type` on every column).
//! Unknown fields and unrecognized database names never fail a
//! document; the latter only produce a warning.

use crate::model::RemlSchema;
use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

/// Database dialect identifiers the generator has a profile for.
pub const SUPPORTED_DATABASES: [&str; 6] = [
    "postgresql",
    "mysql",
    "mariadb",
    "sqlite",
    "sqlserver",
    "oracle",
];

/// Issue severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A structural issue found in a REML document
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ValidationIssue {
    pub code: &'static str,
    pub severity: Severity,
    /// Dotted path into the document, e.g. `tables.users.columns.id.type`.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(code: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(code: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a REML document
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ValidationReport {
    /// True when no error-severity issues were found.
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

/// Parse a REML YAML document into the schema model.
pub fn parse_reml(input: &str) -> Result<RemlSchema> {
    serde_yaml::from_str(input).context("failed to parse REML document")
}

/// Validate the structural minimum of a parsed REML document.
///
/// Never panics and never rejects extra content; see module docs.
pub fn validate_reml(schema: &RemlSchema) -> ValidationReport {
    let mut issues = Vec::new();

    if schema.reml.is_empty() {
        issues.push(ValidationIssue::error(
            "missing-reml-version",
            "reml",
            "REML version is required",
        ));
    }

    if schema.database.is_empty() {
        issues.push(ValidationIssue::error(
            "missing-database",
            "database",
            "Database type is required",
        ));
    } else if !SUPPORTED_DATABASES.contains(&schema.database.as_str()) {
        issues.push(ValidationIssue::warning(
            "unknown-database",
            "database",
            format!(
                "Database \"{}\" may not be fully supported. Generation falls back to the PostgreSQL profile.",
                schema.database
            ),
        ));
    }

    if schema.tables.is_empty() {
        issues.push(ValidationIssue::error(
            "no-tables",
            "tables",
            "At least one table is required",
        ));
    }

    for (table_name, table) in &schema.tables {
        if table.columns.is_empty() {
            issues.push(ValidationIssue::error(
                "no-columns",
                format!("tables.{table_name}.columns"),
                format!("Table \"{table_name}\" must have at least one column"),
            ));
        }

        for (column_name, column) in &table.columns {
            if column.col_type.is_empty() {
                issues.push(ValidationIssue::error(
                    "missing-column-type",
                    format!("tables.{table_name}.columns.{column_name}.type"),
                    format!("Column \"{column_name}\" must have a type"),
                ));
            }
        }
    }

    ValidationReport {
        valid: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}
