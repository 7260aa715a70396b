//! Command-line interface definitions.
//!
//! Flags given here take precedence over `snippetbox.toml` and `SNIPPETBOX_*`
//! environment variables.

use clap::Parser;
use figment::providers::Serialized;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::schema::Entity;
use crate::error::SchemaError;

/// Drop and recreate the snippetbox database tables
#[derive(Parser, Debug, Serialize)]
#[command(name = "snippetbox-db")]
#[command(version)]
pub struct Cli {
    /// SQLite database file [default: ./db/snippetbox.db]
    #[arg(long = "database", value_name = "PATH")]
    #[serde(rename = "database_path", skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Table to reset; repeat for several [default: all]
    #[arg(short = 't', long = "table", value_name = "TABLE", value_enum)]
    #[serde(rename = "tables", skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Entity>,

    /// Drop selected tables even when they hold rows
    #[arg(short = 'y', long = "yes")]
    #[serde(rename = "assume_yes", skip_serializing_if = "is_false")]
    pub yes: bool,

    /// Log filter, e.g. `debug` (RUST_LOG wins when set)
    #[arg(long, value_name = "FILTER")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loglevel: Option<String>,

    /// Print the statements that would run without touching the database
    #[arg(long)]
    #[serde(skip)]
    pub dry_run: bool,

    /// JSON output for scripting
    #[arg(long)]
    #[serde(skip)]
    pub json: bool,

    /// Read configuration from this file instead of ./snippetbox.toml
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Cli {
    /// Resolve the effective configuration with these flags applied last.
    pub fn load_config(&self) -> Result<Config, SchemaError> {
        let figment = Config::figment(self.config.as_deref())?.merge(Serialized::defaults(self));
        Config::from_figment(&figment)
    }
}
