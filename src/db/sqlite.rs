use crate::db::inspect;
use crate::db::schema::{Entity, SCHEMA_VERSION};
use crate::db::selection::EntitySelection;
use crate::error::SchemaError;
use crate::types::{InitReport, TableReport};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Open a single connection to the database file, creating the file if absent.
/// The parent directory must already exist.
pub async fn open_connection(path: &Path) -> Result<SqliteConnection, SchemaError> {
    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let conn = SqliteConnection::connect_with(&opts).await?;
    debug!(path = %path.display(), "sqlite connection opened");
    Ok(conn)
}

fn user_version_pragma() -> String {
    format!("PRAGMA user_version = {SCHEMA_VERSION}")
}

/// Drops and recreates the selected tables.
#[derive(Debug, Clone, Default)]
pub struct SchemaInitializer {
    selection: EntitySelection,
}

impl SchemaInitializer {
    pub fn new(selection: EntitySelection) -> Self {
        Self { selection }
    }

    /// Every statement `apply` executes, in order.
    pub fn plan(&self) -> Vec<String> {
        let mut stmts: Vec<String> = self
            .selection
            .iter()
            .flat_map(|entity| entity.statements())
            .map(|s| s.trim().to_string())
            .collect();
        stmts.push(user_version_pragma());
        stmts
    }

    /// Execute the plan in one transaction. Nothing is committed unless every
    /// statement succeeds; the transaction rolls back when dropped.
    pub async fn apply(&self, conn: &mut SqliteConnection) -> Result<(), SchemaError> {
        let mut tx = conn.begin().await?;

        for entity in self.selection.iter() {
            info!(table = %entity, "resetting table");
            for stmt in entity.statements() {
                let stmt = stmt.trim();
                debug!(statement = stmt, "executing");
                sqlx::query(stmt)
                    .persistent(false)
                    .execute(&mut *tx)
                    .await
                    .inspect_err(|e| error!(table = %entity, error = %e, "statement failed"))?;
            }
        }

        let pragma = user_version_pragma();
        sqlx::query(&pragma)
            .persistent(false)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(
            tables = self.selection.len(),
            schema_version = SCHEMA_VERSION,
            "schema committed"
        );
        Ok(())
    }

    /// Selected tables that already exist and hold at least one row.
    pub async fn populated_tables(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Entity>, SchemaError> {
        let mut populated = Vec::new();
        for entity in self.selection.iter() {
            let name = entity.table_name();
            if inspect::table_exists(conn, name).await? && inspect::row_count(conn, name).await? > 0
            {
                populated.push(entity);
            }
        }
        Ok(populated)
    }

    /// Inspect the selected tables as they now exist on `conn`.
    pub async fn report(
        &self,
        conn: &mut SqliteConnection,
        database_path: &Path,
    ) -> Result<InitReport, SchemaError> {
        let mut tables = Vec::with_capacity(self.selection.len());
        for entity in self.selection.iter() {
            let name = entity.table_name();
            tables.push(TableReport {
                entity,
                columns: inspect::table_columns(conn, name).await?,
                indexes: inspect::index_names(conn, name).await?,
                unique_indexes: inspect::unique_indexes(conn, name).await?,
                rows: inspect::row_count(conn, name).await?,
            });
        }

        Ok(InitReport {
            database_path: database_path.to_path_buf(),
            dry_run: false,
            schema_version: inspect::user_version(conn).await?,
            statements: self.plan(),
            tables,
        })
    }

    pub fn dry_run_report(&self, database_path: &Path) -> InitReport {
        InitReport {
            database_path: database_path.to_path_buf(),
            dry_run: true,
            schema_version: SCHEMA_VERSION,
            statements: self.plan(),
            tables: Vec::new(),
        }
    }
}

/// Inputs for one run of the initializer.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub database_path: PathBuf,
    pub selection: EntitySelection,
    pub dry_run: bool,
    /// Allow dropping selected tables that still hold rows. Without it a run
    /// only proceeds when every selected table is missing or empty, so an
    /// empty file left by an interrupted first run needs no confirmation.
    pub assume_yes: bool,
}

/// Apply the safety policy, then initialize and report. The connection is
/// closed whether or not initialization succeeds.
pub async fn run(options: &InitOptions) -> Result<InitReport, SchemaError> {
    let initializer = SchemaInitializer::new(options.selection.clone());
    let path = options.database_path.as_path();

    if options.dry_run {
        info!(path = %path.display(), "dry run; database left untouched");
        return Ok(initializer.dry_run_report(path));
    }

    let mut conn = open_connection(path).await?;
    let outcome: Result<InitReport, SchemaError> = async {
        if !options.assume_yes {
            let populated = initializer.populated_tables(&mut conn).await?;
            if !populated.is_empty() {
                warn!(tables = ?populated, "selected tables hold rows; not confirmed");
                return Err(SchemaError::ConfirmationRequired {
                    path: path.to_path_buf(),
                });
            }
        }
        initializer.apply(&mut conn).await?;
        initializer.report(&mut conn, path).await
    }
    .await;
    let closed = conn.close().await;

    let report = outcome?;
    closed?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::Entity;

    #[test]
    fn plan_follows_canonical_order_and_ends_with_version() {
        let init = SchemaInitializer::new(
            EntitySelection::new([Entity::Users, Entity::Snippets]).unwrap(),
        );
        let plan = init.plan();
        assert_eq!(plan.len(), 6);
        assert_eq!(plan[0], "DROP TABLE IF EXISTS snippets");
        assert!(plan[1].starts_with("CREATE TABLE snippets"));
        assert!(plan[2].starts_with("CREATE INDEX idx_snippets_created"));
        assert_eq!(plan[3], "DROP TABLE IF EXISTS users");
        assert!(plan[4].starts_with("CREATE TABLE users"));
        assert_eq!(plan[5], "PRAGMA user_version = 1");
    }

    #[test]
    fn dry_run_report_has_no_tables() {
        let init = SchemaInitializer::default();
        let report = init.dry_run_report(Path::new("db/snippetbox.db"));
        assert!(report.dry_run);
        assert!(report.tables.is_empty());
        assert_eq!(report.statements.len(), 3 + 3 + 2 + 1);
    }
}
