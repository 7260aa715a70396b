pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod types;

pub use error::SchemaError;
