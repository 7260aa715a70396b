//! Database module: schema, selection and initialization for the snippetbox database.
//!
//! Layout:
//! - `schema.rs`: SQL DDL per table (SQLite-first)
//! - `selection.rs`: which tables a run resets
//! - `sqlite.rs`: connection handling and the drop/create initializer
//! - `inspect.rs`: schema introspection used for reports
//! - `models.rs`: Rust structs mirroring DB rows

pub mod inspect;
pub mod models;
pub mod schema;
pub mod selection;
pub mod sqlite;

pub use models::{DbSession, DbSnippet, DbUser};
pub use schema::{DATETIME_FORMAT, Entity, SCHEMA_VERSION, format_datetime};
pub use selection::EntitySelection;
pub use sqlite::{InitOptions, SchemaInitializer, open_connection, run};
