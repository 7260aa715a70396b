use crate::db::inspect::ColumnInfo;
use crate::db::schema::Entity;
use crate::error::SchemaError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Outcome of one initializer run, printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub database_path: PathBuf,
    pub dry_run: bool,
    pub schema_version: i64,
    /// Statements in execution order.
    pub statements: Vec<String>,
    /// Empty for dry runs; nothing is inspected.
    pub tables: Vec<TableReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub entity: Entity,
    pub columns: Vec<ColumnInfo>,
    pub indexes: Vec<String>,
    pub unique_indexes: Vec<String>,
    pub rows: i64,
}

impl InitReport {
    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for InitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            writeln!(
                f,
                "dry run: {} statement(s) would run against {}",
                self.statements.len(),
                self.database_path.display()
            )?;
            for stmt in &self.statements {
                writeln!(f, "{};", compact(stmt))?;
            }
            return Ok(());
        }

        writeln!(
            f,
            "initialized {} (schema version {})",
            self.database_path.display(),
            self.schema_version
        )?;
        for table in &self.tables {
            let columns: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
            write!(f, "  {}: {}", table.entity, columns.join(", "))?;
            if !table.indexes.is_empty() {
                write!(f, " [index: {}]", table.indexes.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn compact(stmt: &str) -> String {
    stmt.split_whitespace().collect::<Vec<_>>().join(" ")
}
