//! Unit tests for the dialect registry.

use remlgen::dialect::{
    AutoIncrement, Dialect, EnumStrategy, QuoteStyle, BASE_TYPE_MAP,
};

mod resolution_tests {
    use super::*;

    #[test]
    fn test_resolve_known_names() {
        assert_eq!(Dialect::resolve("postgresql"), Dialect::Postgres);
        assert_eq!(Dialect::resolve("postgres"), Dialect::Postgres);
        assert_eq!(Dialect::resolve("mysql"), Dialect::MySql);
        assert_eq!(Dialect::resolve("mariadb"), Dialect::MariaDb);
        assert_eq!(Dialect::resolve("sqlite"), Dialect::Sqlite);
        assert_eq!(Dialect::resolve("sqlserver"), Dialect::SqlServer);
        assert_eq!(Dialect::resolve("mssql"), Dialect::SqlServer);
        assert_eq!(Dialect::resolve("oracle"), Dialect::Oracle);
        assert_eq!(Dialect::resolve("MySQL"), Dialect::MySql);
    }

    #[test]
    fn test_unknown_name_falls_back_to_postgres() {
        assert_eq!(Dialect::resolve("db2"), Dialect::Postgres);
        assert_eq!(Dialect::resolve(""), Dialect::Postgres);
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert!("db2".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Dialect::Postgres.to_string(), "postgresql");
        assert_eq!(Dialect::SqlServer.to_string(), "sqlserver");
    }
}

mod quoting_tests {
    use super::*;

    #[test]
    fn test_quote_styles() {
        assert_eq!(QuoteStyle::DoubleQuote.quote("users"), "\"users\"");
        assert_eq!(QuoteStyle::Backtick.quote("users"), "`users`");
        assert_eq!(QuoteStyle::Bracket.quote("users"), "[users]");
    }

    #[test]
    fn test_quoting_is_injective() {
        // Distinct identifiers (without embedded quote characters) stay
        // distinguishable after quoting.
        let names = ["users", "Users", "user_accounts", "u"];
        for style in [
            QuoteStyle::DoubleQuote,
            QuoteStyle::Backtick,
            QuoteStyle::Bracket,
        ] {
            let quoted: Vec<String> = names.iter().map(|n| style.quote(n)).collect();
            for i in 0..quoted.len() {
                for j in 0..quoted.len() {
                    if i != j {
                        assert_ne!(quoted[i], quoted[j]);
                    }
                }
            }
        }
    }
}

mod type_map_tests {
    use super::*;

    #[test]
    fn test_baseline_resolves_for_all_dialects() {
        for dialect in Dialect::ALL {
            let config = dialect.config();
            for (logical, _) in BASE_TYPE_MAP {
                let physical = config.lookup_type(logical);
                assert!(
                    physical.is_some_and(|p| !p.is_empty()),
                    "{logical} must resolve for {dialect}"
                );
            }
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let config = Dialect::Postgres.config();
        assert_eq!(config.resolve_type("VarChar"), "VARCHAR");
        assert_eq!(config.resolve_type("TIMESTAMPTZ"), "TIMESTAMPTZ");
    }

    #[test]
    fn test_unknown_type_passes_through_uppercased() {
        let config = Dialect::Postgres.config();
        assert_eq!(config.resolve_type("geography"), "GEOGRAPHY");
        assert_eq!(config.resolve_type("my_custom_type"), "MY_CUSTOM_TYPE");
    }

    #[test]
    fn test_dialect_overrides_win_over_baseline() {
        assert_eq!(Dialect::MySql.config().resolve_type("boolean"), "TINYINT(1)");
        assert_eq!(Dialect::MariaDb.config().resolve_type("uuid"), "CHAR(36)");
        assert_eq!(Dialect::Sqlite.config().resolve_type("decimal"), "REAL");
        assert_eq!(
            Dialect::SqlServer.config().resolve_type("uuid"),
            "UNIQUEIDENTIFIER"
        );
        assert_eq!(Dialect::Oracle.config().resolve_type("varchar"), "VARCHAR2");
        assert_eq!(Dialect::Oracle.config().resolve_type("integer"), "NUMBER(10)");
        // Postgres keeps the baseline untouched
        assert_eq!(Dialect::Postgres.config().resolve_type("boolean"), "BOOLEAN");
    }
}

mod auto_increment_tests {
    use super::*;

    #[test]
    fn test_serial_type_substitution() {
        let render = AutoIncrement::SerialType.apply("BIGINT");
        assert_eq!(render.replacement_type, Some("BIGSERIAL"));
        assert_eq!(render.suffix, None);

        let render = AutoIncrement::SerialType.apply("INTEGER");
        assert_eq!(render.replacement_type, Some("SERIAL"));
    }

    #[test]
    fn test_suffix_keywords() {
        let render = Dialect::MySql.config().auto_increment.apply("BIGINT");
        assert_eq!(render.replacement_type, None);
        assert_eq!(render.suffix, Some("AUTO_INCREMENT"));

        assert_eq!(
            Dialect::Sqlite.config().auto_increment.apply("INTEGER").suffix,
            Some("AUTOINCREMENT")
        );
        assert_eq!(
            Dialect::SqlServer.config().auto_increment.apply("INT").suffix,
            Some("IDENTITY(1,1)")
        );
        assert_eq!(
            Dialect::Oracle.config().auto_increment.apply("NUMBER(19)").suffix,
            Some("GENERATED ALWAYS AS IDENTITY")
        );
    }
}

mod default_fn_tests {
    use super::*;

    #[test]
    fn test_now_rewrites() {
        assert_eq!(
            Dialect::Postgres.config().rewrite_default_fn("now()"),
            Some("NOW()")
        );
        assert_eq!(
            Dialect::MySql.config().rewrite_default_fn("now()"),
            Some("CURRENT_TIMESTAMP")
        );
        assert_eq!(
            Dialect::Sqlite.config().rewrite_default_fn("now()"),
            Some("datetime('now')")
        );
        assert_eq!(
            Dialect::SqlServer.config().rewrite_default_fn("now()"),
            Some("GETDATE()")
        );
        assert_eq!(
            Dialect::Oracle.config().rewrite_default_fn("now()"),
            Some("SYSDATE")
        );
    }

    #[test]
    fn test_uuid_rewrites() {
        assert_eq!(
            Dialect::Postgres.config().rewrite_default_fn("uuid()"),
            Some("gen_random_uuid()")
        );
        assert_eq!(
            Dialect::MySql.config().rewrite_default_fn("gen_random_uuid()"),
            Some("(UUID())")
        );
        assert_eq!(
            Dialect::SqlServer.config().rewrite_default_fn("uuid()"),
            Some("NEWID()")
        );
        assert_eq!(
            Dialect::Oracle.config().rewrite_default_fn("uuid()"),
            Some("SYS_GUID()")
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(
            Dialect::Postgres.config().rewrite_default_fn("NOW()"),
            Some("NOW()")
        );
        assert_eq!(
            Dialect::Postgres.config().rewrite_default_fn("Current_Timestamp"),
            Some("CURRENT_TIMESTAMP")
        );
    }

    #[test]
    fn test_unknown_literal_is_not_rewritten() {
        assert_eq!(Dialect::Postgres.config().rewrite_default_fn("pending"), None);
    }
}

mod strategy_tests {
    use super::*;

    #[test]
    fn test_enum_strategies() {
        assert_eq!(
            Dialect::Postgres.config().enum_strategy,
            EnumStrategy::CreateType
        );
        assert_eq!(
            Dialect::MySql.config().enum_strategy,
            EnumStrategy::InlineEnum
        );
        assert_eq!(
            Dialect::MariaDb.config().enum_strategy,
            EnumStrategy::InlineEnum
        );
        assert_eq!(
            Dialect::Sqlite.config().enum_strategy,
            EnumStrategy::CheckConstraint
        );
        assert_eq!(
            Dialect::SqlServer.config().enum_strategy,
            EnumStrategy::CheckConstraint
        );
        assert_eq!(
            Dialect::Oracle.config().enum_strategy,
            EnumStrategy::CheckConstraint
        );
    }

    #[test]
    fn test_if_not_exists_support() {
        assert!(Dialect::Postgres.config().supports_if_not_exists);
        assert!(Dialect::MySql.config().supports_if_not_exists);
        assert!(Dialect::Sqlite.config().supports_if_not_exists);
        assert!(!Dialect::SqlServer.config().supports_if_not_exists);
        assert!(!Dialect::Oracle.config().supports_if_not_exists);
    }

    #[test]
    fn test_array_support() {
        assert!(Dialect::Postgres.config().supports_arrays);
        for dialect in [
            Dialect::MySql,
            Dialect::MariaDb,
            Dialect::Sqlite,
            Dialect::SqlServer,
            Dialect::Oracle,
        ] {
            assert!(!dialect.config().supports_arrays);
        }
    }
}
