//! JSON Schema generation for the REML document format and CLI output
//! types.
//!
//! Schemas are generated with the schemars crate and exported via the
//! `schema` subcommand, so editors and CI pipelines can validate REML
//! documents and machine-readable command output.

use schemars::{schema::RootSchema, schema_for};
use std::collections::BTreeMap;

/// Returns all exported JSON schemas.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, RootSchema> {
    let mut schemas = BTreeMap::new();

    // The REML document format itself
    schemas.insert("reml", schema_for!(crate::model::RemlSchema));

    // validate command --json output
    schemas.insert("validate", schema_for!(crate::parser::ValidationReport));

    schemas
}

/// Generate a single schema by name.
pub fn get_schema(name: &str) -> Option<RootSchema> {
    all_schemas().remove(name)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}
