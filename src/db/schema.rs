//! SQL DDL for the snippetbox database.
//! SQLite-first; every statement is executed on its own, never as a batch.
//!
//! Timestamps (`snippets.created`, `snippets.expires`, `users.created`) are
//! `DATETIME` columns holding UTC text in SQLite's own `datetime()` form,
//! `YYYY-MM-DD HH:MM:SS` (see [`DATETIME_FORMAT`]). Text order is then
//! chronological order, which `idx_snippets_created` relies on.
//! `sessions.expiry` is a `REAL` number of seconds.

use crate::error::SchemaError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Same text `datetime('now')` produces.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp for a `DATETIME` column. Sub-second precision is dropped.
pub fn format_datetime(at: &DateTime<Utc>) -> String {
    at.format(DATETIME_FORMAT).to_string()
}

/// Written to `PRAGMA user_version` after every successful initialization.
pub const SCHEMA_VERSION: i64 = 1;

/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `created` indexed for chronological listing
pub const SNIPPETS_DROP: &str = "DROP TABLE IF EXISTS snippets";
pub const SNIPPETS_CREATE: &str = r#"
CREATE TABLE snippets (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    created DATETIME NOT NULL,
    expires DATETIME NOT NULL
)"#;
pub const SNIPPETS_INDEXES: &[&str] =
    &["CREATE INDEX idx_snippets_created ON snippets(created)"];

/// Session store table; `data` is opaque to this crate.
pub const SESSIONS_DROP: &str = "DROP TABLE IF EXISTS sessions";
pub const SESSIONS_CREATE: &str = r#"
CREATE TABLE sessions (
    token TEXT PRIMARY KEY,
    data BLOB NOT NULL,
    expiry REAL NOT NULL
)"#;
pub const SESSIONS_INDEXES: &[&str] = &["CREATE INDEX sessions_expiry_idx ON sessions(expiry)"];

/// `email` UNIQUE (creates an index implicitly); passwords arrive pre-hashed.
pub const USERS_DROP: &str = "DROP TABLE IF EXISTS users";
pub const USERS_CREATE: &str = r#"
CREATE TABLE users (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    hashed_password TEXT NOT NULL,
    created DATETIME NOT NULL
)"#;
pub const USERS_INDEXES: &[&str] = &[];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Snippets,
    Sessions,
    Users,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Snippets, Entity::Sessions, Entity::Users];

    pub fn table_name(self) -> &'static str {
        match self {
            Entity::Snippets => "snippets",
            Entity::Sessions => "sessions",
            Entity::Users => "users",
        }
    }

    pub fn drop_statement(self) -> &'static str {
        match self {
            Entity::Snippets => SNIPPETS_DROP,
            Entity::Sessions => SESSIONS_DROP,
            Entity::Users => USERS_DROP,
        }
    }

    pub fn create_statement(self) -> &'static str {
        match self {
            Entity::Snippets => SNIPPETS_CREATE,
            Entity::Sessions => SESSIONS_CREATE,
            Entity::Users => USERS_CREATE,
        }
    }

    pub fn index_statements(self) -> &'static [&'static str] {
        match self {
            Entity::Snippets => SNIPPETS_INDEXES,
            Entity::Sessions => SESSIONS_INDEXES,
            Entity::Users => USERS_INDEXES,
        }
    }

    /// Names of the explicit secondary indexes this entity declares.
    pub fn index_names(self) -> &'static [&'static str] {
        match self {
            Entity::Snippets => &["idx_snippets_created"],
            Entity::Sessions => &["sessions_expiry_idx"],
            Entity::Users => &[],
        }
    }

    /// Drop, create, then indexes, in execution order.
    pub fn statements(self) -> Vec<&'static str> {
        let mut stmts = vec![self.drop_statement(), self.create_statement()];
        stmts.extend_from_slice(self.index_statements());
        stmts
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Entity {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Entity::ALL
            .into_iter()
            .find(|e| e.table_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SchemaError::UnknownEntity(wanted.to_string()))
    }
}
