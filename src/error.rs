use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown table '{0}' (expected one of: snippets, sessions, users)")]
    UnknownEntity(String),

    #[error("no tables selected for initialization")]
    EmptySelection,

    #[error(
        "refusing to reset {}: selected tables hold rows; pass --yes to drop and recreate them",
        path.display()
    )]
    ConfirmationRequired { path: PathBuf },
}

impl From<figment::Error> for SchemaError {
    fn from(e: figment::Error) -> Self {
        SchemaError::Config(Box::new(e))
    }
}

impl SchemaError {
    /// True when the failure came from a UNIQUE or PRIMARY KEY constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            SchemaError::Database(SqlxError::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }

    pub fn is_not_null_violation(&self) -> bool {
        match self {
            SchemaError::Database(SqlxError::Database(db_err)) => {
                matches!(db_err.kind(), sqlx::error::ErrorKind::NotNullViolation)
            }
            _ => false,
        }
    }
}
