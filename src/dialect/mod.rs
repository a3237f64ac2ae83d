//! Dialect registry: per-database SQL syntax profiles.
//!
//! The six dialects share most behavior; each profile is a flat data
//! bundle of targeted overrides (quoting character, auto-increment
//! rendering, enum strategy, type map deltas, default-function
//! rewrites) so the generator itself stays dialect-agnostic and the
//! six behaviors are auditable side by side.

use ahash::AHashMap;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

/// Target database dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
    MariaDb,
    Sqlite,
    SqlServer,
    Oracle,
}

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::MariaDb,
        Dialect::Sqlite,
        Dialect::SqlServer,
        Dialect::Oracle,
    ];

    /// Resolve a dialect name, falling back to PostgreSQL for anything
    /// unrecognized. Unknown dialects degrade to the most standard-SQL
    /// profile instead of failing.
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or(Dialect::Postgres)
    }

    /// The syntax profile for this dialect.
    pub fn config(self) -> &'static DialectConfig {
        match self {
            Dialect::Postgres => &POSTGRES,
            Dialect::MySql => &MYSQL,
            Dialect::MariaDb => &MARIADB,
            Dialect::Sqlite => &SQLITE,
            Dialect::SqlServer => &SQLSERVER,
            Dialect::Oracle => &ORACLE,
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgresql" | "postgres" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "mariadb" => Ok(Dialect::MariaDb),
            "sqlite" => Ok(Dialect::Sqlite),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            "oracle" => Ok(Dialect::Oracle),
            _ => Err(format!(
                "Unknown dialect: {s}. Valid options: postgresql, mysql, mariadb, sqlite, sqlserver, oracle"
            )),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().name)
    }
}

/// Identifier quoting convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    DoubleQuote,
    Backtick,
    Bracket,
}

impl QuoteStyle {
    pub fn quote(self, name: &str) -> String {
        match self {
            QuoteStyle::DoubleQuote => format!("\"{name}\""),
            QuoteStyle::Backtick => format!("`{name}`"),
            QuoteStyle::Bracket => format!("[{name}]"),
        }
    }
}

/// How an auto-incrementing column renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoIncrement {
    /// Substitute the resolved type with a serial type
    /// (BIGINT becomes BIGSERIAL, everything else SERIAL).
    SerialType,
    /// Keep the resolved type and append a trailing keyword.
    Suffix(&'static str),
}

/// Rendering instructions for an auto-incrementing column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoIncrementRender {
    pub replacement_type: Option<&'static str>,
    pub suffix: Option<&'static str>,
}

impl AutoIncrement {
    pub fn apply(self, resolved_type: &str) -> AutoIncrementRender {
        match self {
            AutoIncrement::SerialType => AutoIncrementRender {
                replacement_type: Some(if resolved_type == "BIGINT" {
                    "BIGSERIAL"
                } else {
                    "SERIAL"
                }),
                suffix: None,
            },
            AutoIncrement::Suffix(keyword) => AutoIncrementRender {
                replacement_type: None,
                suffix: Some(keyword),
            },
        }
    }
}

/// How enumerated columns are represented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStrategy {
    /// Standalone CREATE TYPE ... AS ENUM, referenced by name.
    CreateType,
    /// Inline ENUM(...) column type literal.
    InlineEnum,
    /// Fall back to the base scalar type (integer or fixed-length
    /// string); any CHECK enforcement is left to the schema author.
    CheckConstraint,
}

/// How table/column comments are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStrategy {
    /// Separate COMMENT ON TABLE/COLUMN statements appended at the end.
    CommentOn,
    /// Trailing ALTER TABLE ... COMMENT after each table.
    AlterComment,
    /// Best-effort `--` comment lines preceding each table.
    SqlComment,
}

/// Syntax profile for one dialect. Pure data; six literal instances
/// below.
#[derive(Debug)]
pub struct DialectConfig {
    /// Canonical lowercase dialect name.
    pub name: &'static str,
    pub quote: QuoteStyle,
    pub auto_increment: AutoIncrement,
    pub enum_strategy: EnumStrategy,
    /// Logical-to-physical type overrides applied before the shared
    /// baseline map. Keys are lowercase.
    pub type_overrides: &'static [(&'static str, &'static str)],
    /// Rewrites of well-known symbolic defaults to native expressions.
    /// Keys are lowercase.
    pub default_fn_map: &'static [(&'static str, &'static str)],
    pub supports_if_not_exists: bool,
    /// Native array column support (`TYPE[]`).
    pub supports_arrays: bool,
    /// Whether CREATE INDEX accepts a USING method clause.
    pub supports_index_using: bool,
    pub comment_strategy: CommentStrategy,
}

impl DialectConfig {
    /// Wrap a bare identifier in the dialect's quoting characters.
    pub fn quote_identifier(&self, name: &str) -> String {
        self.quote.quote(name)
    }

    /// Look up the physical type for a logical type, case-insensitively.
    /// Overrides win over the shared baseline map.
    pub fn lookup_type(&self, logical: &str) -> Option<&'static str> {
        let key = logical.to_lowercase();
        self.type_overrides
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .or_else(|| BASE_TYPE_LOOKUP.get(key.as_str()).copied())
    }

    /// Resolve a logical type to a physical type string. Unknown types
    /// pass through uppercased, preserving custom type extensions.
    pub fn resolve_type(&self, logical: &str) -> String {
        match self.lookup_type(logical) {
            Some(mapped) => mapped.to_string(),
            None => logical.to_uppercase(),
        }
    }

    /// Rewrite a symbolic default (e.g. `now()`, `uuid()`) to the
    /// dialect's native expression. Lookup is case-insensitive.
    pub fn rewrite_default_fn(&self, value: &str) -> Option<&'static str> {
        let key = value.to_lowercase();
        self.default_fn_map
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// Shared baseline map of logical REML types to ANSI-leaning physical
/// types. Dialect profiles override individual entries.
pub static BASE_TYPE_MAP: &[(&str, &str)] = &[
    ("integer", "INTEGER"),
    ("bigint", "BIGINT"),
    ("smallint", "SMALLINT"),
    ("tinyint", "TINYINT"),
    ("decimal", "DECIMAL"),
    ("numeric", "NUMERIC"),
    ("float", "FLOAT"),
    ("double", "DOUBLE PRECISION"),
    ("real", "REAL"),
    ("char", "CHAR"),
    ("varchar", "VARCHAR"),
    ("text", "TEXT"),
    ("nchar", "NCHAR"),
    ("nvarchar", "NVARCHAR"),
    ("ntext", "NTEXT"),
    ("date", "DATE"),
    ("time", "TIME"),
    ("datetime", "DATETIME"),
    ("timestamp", "TIMESTAMP"),
    ("timestamptz", "TIMESTAMPTZ"),
    ("binary", "BINARY"),
    ("varbinary", "VARBINARY"),
    ("blob", "BLOB"),
    ("boolean", "BOOLEAN"),
    ("bit", "BIT"),
    ("uuid", "UUID"),
    ("json", "JSON"),
    ("jsonb", "JSONB"),
    ("array", "TEXT"),
];

static BASE_TYPE_LOOKUP: Lazy<AHashMap<&'static str, &'static str>> =
    Lazy::new(|| BASE_TYPE_MAP.iter().copied().collect());

static MYSQL_TYPE_OVERRIDES: &[(&str, &str)] = &[
    ("boolean", "TINYINT(1)"),
    ("double", "DOUBLE"),
    ("timestamptz", "TIMESTAMP"),
    ("uuid", "CHAR(36)"),
    ("jsonb", "JSON"),
    ("blob", "LONGBLOB"),
    ("ntext", "LONGTEXT"),
];

static MYSQL_DEFAULT_FNS: &[(&str, &str)] = &[
    ("now()", "CURRENT_TIMESTAMP"),
    ("current_timestamp", "CURRENT_TIMESTAMP"),
    ("gen_random_uuid()", "(UUID())"),
    ("uuid()", "(UUID())"),
];

pub static POSTGRES: DialectConfig = DialectConfig {
    name: "postgresql",
    quote: QuoteStyle::DoubleQuote,
    auto_increment: AutoIncrement::SerialType,
    enum_strategy: EnumStrategy::CreateType,
    type_overrides: &[],
    default_fn_map: &[
        ("now()", "NOW()"),
        ("current_timestamp", "CURRENT_TIMESTAMP"),
        ("gen_random_uuid()", "gen_random_uuid()"),
        ("uuid()", "gen_random_uuid()"),
    ],
    supports_if_not_exists: true,
    supports_arrays: true,
    supports_index_using: true,
    comment_strategy: CommentStrategy::CommentOn,
};

pub static MYSQL: DialectConfig = DialectConfig {
    name: "mysql",
    quote: QuoteStyle::Backtick,
    auto_increment: AutoIncrement::Suffix("AUTO_INCREMENT"),
    enum_strategy: EnumStrategy::InlineEnum,
    type_overrides: MYSQL_TYPE_OVERRIDES,
    default_fn_map: MYSQL_DEFAULT_FNS,
    supports_if_not_exists: true,
    supports_arrays: false,
    supports_index_using: true,
    comment_strategy: CommentStrategy::AlterComment,
};

pub static MARIADB: DialectConfig = DialectConfig {
    name: "mariadb",
    quote: QuoteStyle::Backtick,
    auto_increment: AutoIncrement::Suffix("AUTO_INCREMENT"),
    enum_strategy: EnumStrategy::InlineEnum,
    type_overrides: MYSQL_TYPE_OVERRIDES,
    default_fn_map: MYSQL_DEFAULT_FNS,
    supports_if_not_exists: true,
    supports_arrays: false,
    supports_index_using: true,
    comment_strategy: CommentStrategy::AlterComment,
};

pub static SQLITE: DialectConfig = DialectConfig {
    name: "sqlite",
    quote: QuoteStyle::DoubleQuote,
    auto_increment: AutoIncrement::Suffix("AUTOINCREMENT"),
    enum_strategy: EnumStrategy::CheckConstraint,
    type_overrides: &[
        ("boolean", "INTEGER"),
        ("uuid", "TEXT"),
        ("json", "TEXT"),
        ("jsonb", "TEXT"),
        ("timestamptz", "TEXT"),
        ("timestamp", "TEXT"),
        ("datetime", "TEXT"),
        ("decimal", "REAL"),
        ("numeric", "REAL"),
        ("double", "REAL"),
        ("float", "REAL"),
    ],
    default_fn_map: &[
        ("now()", "datetime('now')"),
        ("current_timestamp", "CURRENT_TIMESTAMP"),
        ("gen_random_uuid()", "hex(randomblob(16))"),
        ("uuid()", "hex(randomblob(16))"),
    ],
    supports_if_not_exists: true,
    supports_arrays: false,
    supports_index_using: false,
    comment_strategy: CommentStrategy::SqlComment,
};

pub static SQLSERVER: DialectConfig = DialectConfig {
    name: "sqlserver",
    quote: QuoteStyle::Bracket,
    auto_increment: AutoIncrement::Suffix("IDENTITY(1,1)"),
    enum_strategy: EnumStrategy::CheckConstraint,
    type_overrides: &[
        ("boolean", "BIT"),
        ("double", "FLOAT"),
        ("text", "NVARCHAR(MAX)"),
        ("timestamptz", "DATETIMEOFFSET"),
        ("timestamp", "DATETIME2"),
        ("datetime", "DATETIME2"),
        ("uuid", "UNIQUEIDENTIFIER"),
        ("json", "NVARCHAR(MAX)"),
        ("jsonb", "NVARCHAR(MAX)"),
        ("blob", "VARBINARY(MAX)"),
        ("ntext", "NVARCHAR(MAX)"),
    ],
    default_fn_map: &[
        ("now()", "GETDATE()"),
        ("current_timestamp", "GETDATE()"),
        ("gen_random_uuid()", "NEWID()"),
        ("uuid()", "NEWID()"),
    ],
    supports_if_not_exists: false,
    supports_arrays: false,
    supports_index_using: true,
    comment_strategy: CommentStrategy::SqlComment,
};

pub static ORACLE: DialectConfig = DialectConfig {
    name: "oracle",
    quote: QuoteStyle::DoubleQuote,
    auto_increment: AutoIncrement::Suffix("GENERATED ALWAYS AS IDENTITY"),
    enum_strategy: EnumStrategy::CheckConstraint,
    type_overrides: &[
        ("integer", "NUMBER(10)"),
        ("bigint", "NUMBER(19)"),
        ("smallint", "NUMBER(5)"),
        ("tinyint", "NUMBER(3)"),
        ("boolean", "NUMBER(1)"),
        ("double", "BINARY_DOUBLE"),
        ("float", "BINARY_FLOAT"),
        ("real", "BINARY_FLOAT"),
        ("text", "CLOB"),
        ("varchar", "VARCHAR2"),
        ("nvarchar", "NVARCHAR2"),
        ("ntext", "NCLOB"),
        ("timestamp", "TIMESTAMP"),
        ("timestamptz", "TIMESTAMP WITH TIME ZONE"),
        ("datetime", "TIMESTAMP"),
        ("uuid", "RAW(16)"),
        ("json", "CLOB"),
        ("jsonb", "CLOB"),
    ],
    default_fn_map: &[
        ("now()", "SYSDATE"),
        ("current_timestamp", "CURRENT_TIMESTAMP"),
        ("gen_random_uuid()", "SYS_GUID()"),
        ("uuid()", "SYS_GUID()"),
    ],
    supports_if_not_exists: false,
    supports_arrays: false,
    supports_index_using: true,
    comment_strategy: CommentStrategy::CommentOn,
};
