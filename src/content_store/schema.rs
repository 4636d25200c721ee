//! SQLite schema definitions for the content database.
//!
//! Every entity kind shares one `entities` table. The JSON document is stored
//! verbatim; `slug` and `name` are lifted into columns for lookups and
//! uniqueness. Primary keys are integer rowids with unique 24-hex ids.

use crate::sqlite_column;
use crate::sqlite_persistence::{SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP};
use anyhow::Result;
use rusqlite::Connection;

/// Version 0: entities without timestamps.
const ENTITIES_TABLE_V0: Table = Table {
    name: "entities",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true),
        sqlite_column!("kind", &SqlType::Text, non_null = true), // 'SINGER', 'QAWWAL', 'BLOG', 'CLASS'
        sqlite_column!("slug", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("document", &SqlType::Text, non_null = true), // JSON
    ],
    indices: &[("idx_entities_kind", "kind")],
    unique_constraints: &[&["id"], &["kind", "slug"]],
};

/// Version 1: adds creation/update timestamps (RFC 3339 text).
const ENTITIES_TABLE_V1: Table = Table {
    name: "entities",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true),
        sqlite_column!("kind", &SqlType::Text, non_null = true),
        sqlite_column!("slug", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("document", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created_at",
            &SqlType::Text,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!(
            "updated_at",
            &SqlType::Text,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[
        ("idx_entities_kind", "kind"),
        ("idx_entities_kind_created", "kind, created_at"),
    ],
    unique_constraints: &[&["id"], &["kind", "slug"]],
};

fn migrate_v0_to_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "ALTER TABLE entities ADD COLUMN created_at TEXT NOT NULL DEFAULT '1970-01-01T00:00:00Z';
         ALTER TABLE entities ADD COLUMN updated_at TEXT NOT NULL DEFAULT '1970-01-01T00:00:00Z';
         CREATE INDEX idx_entities_kind_created ON entities(kind, created_at);",
    )?;
    Ok(())
}

pub const CONTENT_VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 0,
        tables: &[ENTITIES_TABLE_V0],
        migration: None,
    },
    VersionedSchema {
        version: 1,
        tables: &[ENTITIES_TABLE_V1],
        migration: Some(migrate_v0_to_v1),
    },
];
