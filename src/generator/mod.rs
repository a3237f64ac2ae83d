//! Multi-dialect DDL synthesis.
//!
//! `generate` turns a parsed REML schema into one CREATE-only SQL
//! script for a target dialect: enum type declarations, tables in FK
//! dependency order, indexes, views, and comment statements. The
//! synthesizer is a total function over any well-formed model; it never
//! errors on malformed content (unknown types, unresolvable enum
//! references and the like pass through as text) and is byte-for-byte
//! deterministic, so regenerating on every edit is safe.

use crate::dialect::{CommentStrategy, Dialect, DialectConfig, EnumStrategy};
use crate::graph;
use crate::model::{
    ColumnDef, EnumDef, EnumScalar, ForeignKeyDef, IndexColumn, IndexDef, RemlSchema, TableDef,
    ViewDef,
};

/// Generate the complete DDL script for a schema and target dialect.
pub fn generate(schema: &RemlSchema, dialect: Dialect) -> String {
    let config = dialect.config();
    let mut lines: Vec<String> = Vec::new();

    lines.push("-- ============================================================".to_string());
    lines.push(format!("-- {} DDL", schema.display_name()));
    lines.push(format!("-- Database: {dialect}"));
    if let Some(description) = schema.display_description() {
        lines.push(format!("-- {description}"));
    }
    lines.push("-- Generated by remlgen".to_string());
    lines.push("-- ============================================================".to_string());
    lines.push(String::new());

    for (name, def) in &schema.enums {
        if let Some(ddl) = enum_ddl(name, def, config) {
            lines.push(ddl);
        }
    }

    let ordered = graph::order_tables(schema);
    for table_name in &ordered {
        if let Some(table) = schema.tables.get(table_name) {
            lines.push(table_ddl(table_name, table, schema, config));
        }
    }

    for table_name in &ordered {
        if let Some(table) = schema.tables.get(table_name) {
            for index in &table.indexes {
                lines.push(index_ddl(table_name, index, config));
            }
        }
    }

    for (view_name, view) in &schema.views {
        lines.push(view_ddl(view_name, view, config));
    }

    if config.comment_strategy == CommentStrategy::CommentOn {
        if let Some(block) = comment_on_statements(schema, config) {
            lines.push(block);
        }
    }

    lines.join("\n")
}

/// Escape embedded single quotes for SQL string literals.
pub fn escape_sql(s: &str) -> String {
    s.replace('\'', "''")
}

fn qualified_name(db_schema: Option<&str>, name: &str, config: &DialectConfig) -> String {
    match db_schema {
        Some(ns) => format!(
            "{}.{}",
            config.quote_identifier(ns),
            config.quote_identifier(name)
        ),
        None => config.quote_identifier(name),
    }
}

/// SQL literals for an enum's values, in declared order.
fn enum_literals(def: &EnumDef) -> Vec<String> {
    def.values
        .iter()
        .map(|v| match v.scalar() {
            EnumScalar::Text(s) => format!("'{}'", escape_sql(s)),
            EnumScalar::Integer(n) => n.to_string(),
            EnumScalar::Float(n) => n.to_string(),
        })
        .collect()
}

/// Named enum type declaration. Only the CreateType strategy emits one;
/// the other strategies represent enums at the column level.
fn enum_ddl(name: &str, def: &EnumDef, config: &DialectConfig) -> Option<String> {
    if config.enum_strategy != EnumStrategy::CreateType {
        return None;
    }

    let comment = match &def.label {
        Some(label) => format!("-- {name}: {label}"),
        None => format!("-- Enum: {name}"),
    };
    Some(format!(
        "{comment}\nCREATE TYPE {} AS ENUM ({});\n",
        config.quote_identifier(name),
        enum_literals(def).join(", ")
    ))
}

fn table_ddl(
    table_name: &str,
    table: &TableDef,
    schema: &RemlSchema,
    config: &DialectConfig,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(label) = &table.label {
        lines.push(format!("-- {table_name}: {label}"));
    }
    if config.comment_strategy == CommentStrategy::SqlComment {
        if let Some(description) = &table.description {
            lines.push(format!("-- {description}"));
        }
    }

    let ifne = if config.supports_if_not_exists {
        "IF NOT EXISTS "
    } else {
        ""
    };
    let qualified = qualified_name(table.db_schema.as_deref(), table_name, config);
    lines.push(format!("CREATE TABLE {ifne}{qualified} ("));

    let pk_columns = table.primary_key_columns();
    let inline_pk = pk_columns.len() == 1;

    let mut body: Vec<String> = Vec::new();
    for (column_name, column) in &table.columns {
        let is_inline_pk = inline_pk && pk_columns.contains(&column_name.as_str());
        body.push(column_def(column_name, column, config, is_inline_pk, schema));
    }

    // A single-column primary key renders inline on its column instead
    if pk_columns.len() > 1 {
        let cols: Vec<String> = pk_columns
            .iter()
            .map(|c| config.quote_identifier(c))
            .collect();
        body.push(format!("  PRIMARY KEY ({})", cols.join(", ")));
    }

    for uc in &table.unique_constraints {
        let prefix = match &uc.name {
            Some(name) => format!("CONSTRAINT {} ", config.quote_identifier(name)),
            None => String::new(),
        };
        let cols: Vec<String> = uc.columns.iter().map(|c| config.quote_identifier(c)).collect();
        body.push(format!("  {prefix}UNIQUE ({})", cols.join(", ")));
    }

    for cc in &table.check_constraints {
        let prefix = match &cc.name {
            Some(name) => format!("CONSTRAINT {} ", config.quote_identifier(name)),
            None => String::new(),
        };
        body.push(format!("  {prefix}CHECK ({})", cc.expression));
    }

    for fk in &table.foreign_keys {
        body.push(foreign_key_clause(fk, config));
    }

    lines.push(body.join(",\n"));
    lines.push(");\n".to_string());

    if config.comment_strategy == CommentStrategy::AlterComment {
        if let Some(description) = &table.description {
            lines.push(format!(
                "ALTER TABLE {qualified} COMMENT = '{}';\n",
                escape_sql(description)
            ));
        }
    }

    lines.join("\n")
}

fn column_def(
    column_name: &str,
    column: &ColumnDef,
    config: &DialectConfig,
    inline_pk: bool,
    schema: &RemlSchema,
) -> String {
    let mut parts: Vec<String> = vec![format!("  {}", config.quote_identifier(column_name))];

    let mut sql_type = map_type(column, config, schema);
    let mut trailing_keyword = None;
    if column.auto_increment {
        let render = config.auto_increment.apply(&sql_type);
        if let Some(replacement) = render.replacement_type {
            sql_type = replacement.to_string();
        }
        trailing_keyword = render.suffix;
    }

    parts.push(sql_type);
    if let Some(keyword) = trailing_keyword {
        parts.push(keyword.to_string());
    }

    if !column.nullable || inline_pk {
        parts.push("NOT NULL".to_string());
    }
    if let Some(value) = &column.default {
        parts.push(format!("DEFAULT {}", format_default(value, config)));
    }
    if inline_pk {
        parts.push("PRIMARY KEY".to_string());
    }
    if column.unique && !inline_pk {
        parts.push("UNIQUE".to_string());
    }

    parts.join(" ")
}

/// Resolve a column's physical type. Precedence: enum reference, then
/// array element type, then the logical type through the dialect map
/// with length or precision/scale suffixes (length wins if both are
/// set).
fn map_type(column: &ColumnDef, config: &DialectConfig, schema: &RemlSchema) -> String {
    if let Some(enum_name) = &column.enum_ref {
        if let Some(def) = schema.enums.get(enum_name) {
            return match config.enum_strategy {
                EnumStrategy::CreateType => config.quote_identifier(enum_name),
                EnumStrategy::InlineEnum => format!("ENUM({})", enum_literals(def).join(", ")),
                EnumStrategy::CheckConstraint => {
                    if def.value_type == Some(crate::model::EnumValueType::Integer) {
                        config.resolve_type("integer")
                    } else {
                        format!("{}(50)", config.resolve_type("varchar"))
                    }
                }
            };
        }
        // Unresolvable enum reference: fall through to the plain type
    }

    if let Some(element) = &column.array_of {
        let base = config.resolve_type(element);
        return if config.supports_arrays {
            format!("{base}[]")
        } else {
            config.resolve_type("json")
        };
    }

    let base = config.resolve_type(&column.col_type);
    if let Some(length) = column.length {
        return format!("{base}({length})");
    }
    if let Some(precision) = column.precision {
        return match column.scale {
            Some(scale) => format!("{base}({precision},{scale})"),
            None => format!("{base}({precision})"),
        };
    }
    base
}

fn foreign_key_clause(fk: &ForeignKeyDef, config: &DialectConfig) -> String {
    let source: Vec<String> = fk
        .columns
        .items()
        .iter()
        .map(|c| config.quote_identifier(c))
        .collect();
    let target: Vec<String> = fk
        .references
        .columns
        .items()
        .iter()
        .map(|c| config.quote_identifier(c))
        .collect();

    let mut clause = format!(
        "  FOREIGN KEY ({}) REFERENCES {} ({})",
        source.join(", "),
        config.quote_identifier(&fk.references.table),
        target.join(", ")
    );
    if let Some(action) = &fk.on_delete {
        clause.push_str(&format!(" ON DELETE {action}"));
    }
    if let Some(action) = &fk.on_update {
        clause.push_str(&format!(" ON UPDATE {action}"));
    }
    clause
}

fn index_ddl(table_name: &str, index: &IndexDef, config: &DialectConfig) -> String {
    let unique = if index.unique { "UNIQUE " } else { "" };

    let index_name = match &index.name {
        Some(name) => name.clone(),
        None => {
            let cols: Vec<&str> = index.columns.iter().map(IndexColumn::column_name).collect();
            format!("idx_{table_name}_{}", cols.join("_"))
        }
    };

    let columns: Vec<String> = index
        .columns
        .iter()
        .map(|c| match c {
            IndexColumn::Name(name) => config.quote_identifier(name),
            IndexColumn::Detailed(def) => {
                let mut rendered = config.quote_identifier(&def.column);
                if let Some(order) = &def.order {
                    rendered.push_str(&format!(" {order}"));
                }
                if let Some(nulls) = &def.nulls {
                    rendered.push_str(&format!(" NULLS {nulls}"));
                }
                rendered
            }
        })
        .collect();

    let mut ddl = format!(
        "CREATE {unique}INDEX {} ON {} ({})",
        config.quote_identifier(&index_name),
        config.quote_identifier(table_name),
        columns.join(", ")
    );
    if let Some(method) = &index.index_type {
        if config.supports_index_using {
            ddl.push_str(&format!(" USING {method}"));
        }
    }
    if let Some(predicate) = &index.where_clause {
        ddl.push_str(&format!(" WHERE {predicate}"));
    }
    ddl.push_str(";\n");
    ddl
}

fn view_ddl(view_name: &str, view: &ViewDef, config: &DialectConfig) -> String {
    let materialized = if view.materialized { "MATERIALIZED " } else { "" };
    let qualified = qualified_name(view.db_schema.as_deref(), view_name, config);
    format!("CREATE {materialized}VIEW {qualified} AS\n{};\n", view.query)
}

/// Compose a comment as `label - description` when both are present.
fn compose_comment(label: Option<&str>, description: Option<&str>) -> Option<String> {
    match (label, description) {
        (Some(l), Some(d)) => Some(format!("{l} - {d}")),
        (Some(l), None) => Some(l.to_string()),
        (None, Some(d)) => Some(d.to_string()),
        (None, None) => None,
    }
}

/// Trailing COMMENT ON TABLE/COLUMN block for CommentOn dialects.
fn comment_on_statements(schema: &RemlSchema, config: &DialectConfig) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();

    for (table_name, table) in &schema.tables {
        let qualified_table = config.quote_identifier(table_name);

        if let Some(comment) =
            compose_comment(table.label.as_deref(), table.description.as_deref())
        {
            lines.push(format!(
                "COMMENT ON TABLE {qualified_table} IS '{}';",
                escape_sql(&comment)
            ));
        }

        for (column_name, column) in &table.columns {
            if let Some(comment) =
                compose_comment(column.label.as_deref(), column.description.as_deref())
            {
                lines.push(format!(
                    "COMMENT ON COLUMN {qualified_table}.{} IS '{}';",
                    config.quote_identifier(column_name),
                    escape_sql(&comment)
                ));
            }
        }
    }

    if lines.is_empty() {
        return None;
    }
    Some(format!("\n-- Comments\n{}\n", lines.join("\n")))
}

/// Render a default value. Well-known symbolic defaults go through the
/// dialect's function map; anything that already looks like a function
/// call passes through unescaped; other strings become quoted literals.
fn format_default(value: &serde_yaml::Value, config: &DialectConfig) -> String {
    match value {
        serde_yaml::Value::Null => "NULL".to_string(),
        serde_yaml::Value::Bool(true) => "TRUE".to_string(),
        serde_yaml::Value::Bool(false) => "FALSE".to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => {
            if let Some(rewritten) = config.rewrite_default_fn(s) {
                return rewritten.to_string();
            }
            if s.contains('(') && s.contains(')') {
                return s.clone();
            }
            format!("'{}'", escape_sql(s))
        }
        other => {
            let rendered = serde_yaml::to_string(other).unwrap_or_default();
            format!("'{}'", escape_sql(rendered.trim_end()))
        }
    }
}
