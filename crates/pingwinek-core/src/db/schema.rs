//! SQLite schema definition.

/// Complete database schema for pingwinek.
///
/// Collections are stored as JSON documents under fixed keys, so new
/// optional fields never require a migration.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS key_values (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                          -- JSON document
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
