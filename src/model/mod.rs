//! REML schema model.
//!
//! This module provides:
//! - Data models for schemas, tables, columns, enums, views, and constraints
//! - Serde deserialization from REML YAML documents
//! - Normalization of polymorphic one-or-many column lists
//!
//! The model is lenient by design: unknown fields are ignored, and the
//! minimum required fields (`reml`, `database`, `tables`, column `type`)
//! are checked by the validator in `crate::parser`, not here. All types
//! are pure data; DDL synthesis lives in `crate::generator`.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::Deserialize;

fn default_true() -> bool {
    true
}

/// A field that accepts either a single column name or a list of names.
///
/// Normalized via [`OneOrMany::items`] so the union never propagates
/// past the model boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// The normalized, ordered list of names.
    pub fn items(&self) -> &[String] {
        match self {
            OneOrMany::One(name) => std::slice::from_ref(name),
            OneOrMany::Many(names) => names.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items().iter().any(|n| n == name)
    }
}

/// Scalar enum value: REML allows both strings and numbers.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EnumScalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Detailed enum value entry with optional display metadata.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDef {
    pub value: EnumScalar,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Enum value: a bare scalar shorthand or a detailed entry.
///
/// The two forms are semantically equivalent; only the scalar value
/// participates in generated SQL.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EnumValue {
    Detailed(EnumValueDef),
    Scalar(EnumScalar),
}

impl EnumValue {
    pub fn scalar(&self) -> &EnumScalar {
        match self {
            EnumValue::Detailed(def) => &def.value,
            EnumValue::Scalar(value) => value,
        }
    }
}

/// Declared value type of an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnumValueType {
    String,
    Integer,
}

/// Named enum declaration.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub value_type: Option<EnumValueType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// Declarative column validation rules.
///
/// Carried through the model for round-trip fidelity; the DDL generator
/// does not synthesize CHECK expressions from these.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnValidation {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub min_length: Option<u32>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub check: Option<String>,
}

/// Column definition.
///
/// `col_type` is an open string: unknown logical types pass through
/// uppercased into the generated SQL, so custom types never error.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    #[serde(rename = "type", default)]
    pub col_type: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    #[schemars(with = "Option<serde_json::Value>")]
    pub default: Option<serde_yaml::Value>,
    #[serde(default)]
    #[schemars(with = "Option<serde_json::Value>")]
    pub example: Option<serde_yaml::Value>,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub validation: Option<ColumnValidation>,
    /// Reference to a named enum in the schema's `enums` map.
    #[serde(default)]
    pub enum_ref: Option<String>,
    /// Element type for array columns.
    #[serde(default)]
    pub array_of: Option<String>,
}

/// Foreign key reference target.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyTarget {
    pub table: String,
    pub columns: OneOrMany,
}

/// Foreign key constraint.
///
/// Column lists on both sides pair positionally; matching lengths are a
/// precondition discharged upstream, not re-checked here.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyDef {
    pub columns: OneOrMany,
    pub references: ForeignKeyTarget,
    #[serde(default)]
    pub on_delete: Option<String>,
    #[serde(default)]
    pub on_update: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Table-level unique constraint.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniqueConstraintDef {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Table-level check constraint with a verbatim SQL expression.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckConstraintDef {
    #[serde(default)]
    pub expression: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Index column with optional ordering.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexColumnDef {
    pub column: String,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub nulls: Option<String>,
}

/// Index column: a bare name or a detailed entry.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IndexColumn {
    Name(String),
    Detailed(IndexColumnDef),
}

impl IndexColumn {
    pub fn column_name(&self) -> &str {
        match self {
            IndexColumn::Name(name) => name,
            IndexColumn::Detailed(def) => &def.column,
        }
    }
}

/// Index definition.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub unique: bool,
    /// Index method (BTREE, HASH, GIN, GIST, BRIN, ...).
    #[serde(rename = "type", default)]
    pub index_type: Option<String>,
    /// Predicate for partial indexes.
    #[serde(rename = "where", default)]
    pub where_clause: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Table definition. Column order follows declaration order.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableDef {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Database schema (namespace) qualifier, e.g. `public`.
    #[serde(rename = "schema", default)]
    pub db_schema: Option<String>,
    #[serde(default)]
    pub columns: IndexMap<String, ColumnDef>,
    #[serde(default)]
    pub primary_key: Option<OneOrMany>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDef>,
    #[serde(default)]
    pub unique_constraints: Vec<UniqueConstraintDef>,
    #[serde(default)]
    pub check_constraints: Vec<CheckConstraintDef>,
    #[serde(default)]
    pub indexes: Vec<IndexDef>,
}

impl TableDef {
    /// Primary key column names: the explicit table-level `primaryKey`
    /// declaration when present, otherwise columns flagged with
    /// `primaryKey: true`, in declaration order.
    pub fn primary_key_columns(&self) -> Vec<&str> {
        if let Some(pk) = &self.primary_key {
            return pk.items().iter().map(String::as_str).collect();
        }
        self.columns
            .iter()
            .filter(|(_, col)| col.primary_key)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// View column annotation (documentation only).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewColumnDef {
    #[serde(rename = "type", default)]
    pub col_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// View definition with a verbatim query body.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewDef {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "schema", default)]
    pub db_schema: Option<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub columns: IndexMap<String, ViewColumnDef>,
    #[serde(default)]
    pub materialized: bool,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemlMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Root REML schema document.
///
/// Tables, enums, and views preserve YAML declaration order, which in
/// turn makes generation deterministic.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemlSchema {
    /// REML specification version.
    #[serde(default)]
    pub reml: String,
    /// Target database dialect declared by the document.
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub metadata: Option<RemlMetadata>,
    #[serde(default)]
    pub enums: IndexMap<String, EnumDef>,
    #[serde(default)]
    pub tables: IndexMap<String, TableDef>,
    #[serde(default)]
    pub views: IndexMap<String, ViewDef>,
}

impl RemlSchema {
    /// Display name for headers: `metadata.name` when present and
    /// non-empty, otherwise "Schema".
    pub fn display_name(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or("Schema")
    }

    /// Description for headers: `metadata.description` wins over the
    /// top-level `description`.
    pub fn display_description(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.description.as_deref())
            .or(self.description.as_deref())
            .filter(|d| !d.is_empty())
    }
}
