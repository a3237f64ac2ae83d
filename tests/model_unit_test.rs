//! Unit tests for the REML schema model and its YAML deserialization.

use remlgen::model::{EnumScalar, EnumValue, IndexColumn, OneOrMany};
use remlgen::parser::parse_reml;

mod deserialization_tests {
    use super::*;

    #[test]
    fn test_minimal_document() {
        let yaml = r#"
reml: "1.0"
database: postgresql
tables:
  users:
    columns:
      id:
        type: integer
"#;
        let schema = parse_reml(yaml).unwrap();
        assert_eq!(schema.reml, "1.0");
        assert_eq!(schema.database, "postgresql");
        assert_eq!(schema.tables.len(), 1);
        let users = &schema.tables["users"];
        assert_eq!(users.columns["id"].col_type, "integer");
    }

    #[test]
    fn test_column_defaults() {
        let yaml = r#"
reml: "1.0"
database: postgresql
tables:
  users:
    columns:
      id:
        type: integer
"#;
        let schema = parse_reml(yaml).unwrap();
        let col = &schema.tables["users"].columns["id"];
        assert!(col.nullable); // nullable unless declared otherwise
        assert!(!col.primary_key);
        assert!(!col.auto_increment);
        assert!(!col.unique);
        assert!(col.default.is_none());
        assert!(col.length.is_none());
    }

    #[test]
    fn test_camel_case_keys() {
        let yaml = r#"
reml: "1.0"
database: postgresql
tables:
  posts:
    primaryKey: id
    columns:
      id:
        type: bigint
        primaryKey: true
        autoIncrement: true
      status:
        type: varchar
        enumRef: post_status
      tags:
        type: array
        arrayOf: varchar
    foreignKeys:
      - columns: author_id
        references:
          table: users
          columns: id
        onDelete: CASCADE
"#;
        let schema = parse_reml(yaml).unwrap();
        let posts = &schema.tables["posts"];
        assert!(posts.columns["id"].primary_key);
        assert!(posts.columns["id"].auto_increment);
        assert_eq!(
            posts.columns["status"].enum_ref.as_deref(),
            Some("post_status")
        );
        assert_eq!(posts.columns["tags"].array_of.as_deref(), Some("varchar"));
        assert_eq!(posts.foreign_keys.len(), 1);
        assert_eq!(posts.foreign_keys[0].on_delete.as_deref(), Some("CASCADE"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let yaml = r#"
reml: "1.0"
database: postgresql
futureFeature: true
tables:
  users:
    customExtension: whatever
    columns:
      id:
        type: integer
        someVendorHint: 42
"#;
        let schema = parse_reml(yaml).unwrap();
        assert_eq!(schema.tables["users"].columns["id"].col_type, "integer");
    }

    #[test]
    fn test_column_order_is_preserved() {
        let yaml = r#"
reml: "1.0"
database: postgresql
tables:
  t:
    columns:
      zulu: { type: integer }
      alpha: { type: integer }
      mike: { type: integer }
"#;
        let schema = parse_reml(yaml).unwrap();
        let names: Vec<&String> = schema.tables["t"].columns.keys().collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }
}

mod one_or_many_tests {
    use super::*;

    #[test]
    fn test_single_value_normalizes_to_slice() {
        let one = OneOrMany::One("id".to_string());
        assert_eq!(one.items(), &["id".to_string()]);
        assert_eq!(one.len(), 1);
        assert!(one.contains("id"));
        assert!(!one.contains("other"));
    }

    #[test]
    fn test_many_values() {
        let many = OneOrMany::Many(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(many.len(), 2);
        assert!(many.contains("b"));
    }

    #[test]
    fn test_primary_key_shorthand_and_list() {
        let yaml = r#"
reml: "1.0"
database: postgresql
tables:
  single:
    primaryKey: id
    columns:
      id: { type: integer }
  composite:
    primaryKey: [order_id, product_id]
    columns:
      order_id: { type: integer }
      product_id: { type: integer }
"#;
        let schema = parse_reml(yaml).unwrap();
        assert_eq!(schema.tables["single"].primary_key_columns(), vec!["id"]);
        assert_eq!(
            schema.tables["composite"].primary_key_columns(),
            vec!["order_id", "product_id"]
        );
    }

    #[test]
    fn test_primary_key_falls_back_to_column_flags() {
        let yaml = r#"
reml: "1.0"
database: postgresql
tables:
  t:
    columns:
      a: { type: integer }
      b: { type: integer, primaryKey: true }
"#;
        let schema = parse_reml(yaml).unwrap();
        assert_eq!(schema.tables["t"].primary_key_columns(), vec!["b"]);
    }
}

mod enum_tests {
    use super::*;

    #[test]
    fn test_shorthand_and_detailed_values() {
        let yaml = r#"
reml: "1.0"
database: postgresql
enums:
  status:
    type: string
    values:
      - active
      - value: inactive
        label: Inactive
      - 3
tables:
  t:
    columns:
      id: { type: integer }
"#;
        let schema = parse_reml(yaml).unwrap();
        let status = &schema.enums["status"];
        assert_eq!(status.values.len(), 3);

        assert_eq!(
            status.values[0].scalar(),
            &EnumScalar::Text("active".to_string())
        );
        match &status.values[1] {
            EnumValue::Detailed(def) => {
                assert_eq!(def.value, EnumScalar::Text("inactive".to_string()));
                assert_eq!(def.label.as_deref(), Some("Inactive"));
            }
            EnumValue::Scalar(_) => panic!("expected detailed value"),
        }
        assert_eq!(status.values[2].scalar(), &EnumScalar::Integer(3));
    }
}

mod index_tests {
    use super::*;

    #[test]
    fn test_index_column_forms() {
        let yaml = r#"
reml: "1.0"
database: postgresql
tables:
  users:
    columns:
      id: { type: integer }
      email: { type: varchar }
    indexes:
      - columns: [email]
        unique: true
      - name: idx_custom
        columns:
          - column: id
            order: DESC
            nulls: LAST
        type: BTREE
        where: deleted_at IS NULL
"#;
        let schema = parse_reml(yaml).unwrap();
        let indexes = &schema.tables["users"].indexes;
        assert_eq!(indexes.len(), 2);

        assert!(indexes[0].unique);
        assert_eq!(indexes[0].columns[0].column_name(), "email");
        assert!(indexes[0].name.is_none());

        assert_eq!(indexes[1].name.as_deref(), Some("idx_custom"));
        match &indexes[1].columns[0] {
            IndexColumn::Detailed(def) => {
                assert_eq!(def.column, "id");
                assert_eq!(def.order.as_deref(), Some("DESC"));
                assert_eq!(def.nulls.as_deref(), Some("LAST"));
            }
            IndexColumn::Name(_) => panic!("expected detailed index column"),
        }
        assert_eq!(indexes[1].index_type.as_deref(), Some("BTREE"));
        assert_eq!(
            indexes[1].where_clause.as_deref(),
            Some("deleted_at IS NULL")
        );
    }
}

mod view_tests {
    use super::*;

    #[test]
    fn test_view_definition() {
        let yaml = r#"
reml: "1.0"
database: postgresql
tables:
  users:
    columns:
      id: { type: integer }
views:
  active_users:
    materialized: true
    query: SELECT * FROM users WHERE active
"#;
        let schema = parse_reml(yaml).unwrap();
        let view = &schema.views["active_users"];
        assert!(view.materialized);
        assert_eq!(view.query, "SELECT * FROM users WHERE active");
    }
}

mod metadata_tests {
    use super::*;

    #[test]
    fn test_display_name_and_description() {
        let yaml = r#"
reml: "1.0"
database: postgresql
description: top-level description
metadata:
  name: Shop
  description: metadata description
tables:
  t:
    columns:
      id: { type: integer }
"#;
        let schema = parse_reml(yaml).unwrap();
        assert_eq!(schema.display_name(), "Shop");
        assert_eq!(schema.display_description(), Some("metadata description"));
    }

    #[test]
    fn test_display_name_fallback() {
        let yaml = r#"
reml: "1.0"
database: postgresql
tables:
  t:
    columns:
      id: { type: integer }
"#;
        let schema = parse_reml(yaml).unwrap();
        assert_eq!(schema.display_name(), "Schema");
        assert_eq!(schema.display_description(), None);
    }
}
