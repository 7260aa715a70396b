use crate::db::schema::Entity;
use crate::db::selection::EntitySelection;
use crate::db::sqlite::InitOptions;
use crate::error::SchemaError;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Deserializer, Serialize};
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "snippetbox.toml";
pub const ENV_PREFIX: &str = "SNIPPETBOX_";
pub const DEFAULT_DATABASE_PATH: &str = "./db/snippetbox.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_path")]
    pub database_path: PathBuf,
    /// Accepts a list (`[users, sessions]`) or a comma-separated string.
    #[serde(deserialize_with = "deserialize_tables")]
    pub tables: Vec<Entity>,
    #[serde(deserialize_with = "deserialize_text")]
    pub loglevel: String,
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            tables: Entity::ALL.to_vec(),
            loglevel: "info".to_string(),
            assume_yes: false,
        }
    }
}

impl Config {
    /// Defaults, then `snippetbox.toml` (or `config_file`), then `SNIPPETBOX_*` env.
    pub fn figment(config_file: Option<&Path>) -> Result<Figment, SchemaError> {
        let toml = match config_file {
            Some(path) => {
                if !path.try_exists()? {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("config file {} not found", path.display()),
                    )
                    .into());
                }
                Toml::file(path)
            }
            None => Toml::file(CONFIG_FILE),
        };

        Ok(Figment::from(Serialized::defaults(Config::default()))
            .merge(toml)
            .merge(Env::prefixed(ENV_PREFIX)))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, SchemaError> {
        Ok(figment.extract()?)
    }

    pub fn selection(&self) -> Result<EntitySelection, SchemaError> {
        EntitySelection::new(self.tables.iter().copied())
    }

    pub fn init_options(&self, dry_run: bool) -> Result<InitOptions, SchemaError> {
        Ok(InitOptions {
            database_path: self.database_path.clone(),
            selection: self.selection()?,
            dry_run,
            assume_yes: self.assume_yes,
        })
    }
}

/// Env values arrive typed, so `SNIPPETBOX_DATABASE_PATH=2024` is a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_text())
}

fn deserialize_path<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_text(deserializer).map(PathBuf::from)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableList {
    Many(Vec<String>),
    One(String),
}

fn deserialize_tables<'de, D>(deserializer: D) -> Result<Vec<Entity>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = match TableList::deserialize(deserializer)? {
        TableList::Many(names) => names,
        TableList::One(joined) => joined
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .collect(),
    };
    names
        .iter()
        .map(|name| name.parse::<Entity>().map_err(serde::de::Error::custom))
        .collect()
}
