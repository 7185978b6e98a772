//! Startup check that the command schema is in place

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

/// Tables the API cannot run without
pub const REQUIRED_TABLES: &[&str] = &["commands"];

#[derive(Debug, Error)]
pub enum DatabaseValidationError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct DatabaseValidator {
    pool: SqlitePool,
}

impl DatabaseValidator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn validate(&self) -> Result<ValidationResult, DatabaseValidationError> {
        if !self.table_exists("_sqlx_migrations").await? {
            warn!("Database has no migration history");
            return Ok(ValidationResult {
                is_initialized: false,
                migrations_applied: 0,
                missing_tables: REQUIRED_TABLES.iter().map(|t| t.to_string()).collect(),
            });
        }

        let migrations_applied = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        let mut missing_tables = Vec::new();
        for table in REQUIRED_TABLES {
            if !self.table_exists(table).await? {
                missing_tables.push(table.to_string());
            }
        }

        let result = ValidationResult {
            is_initialized: true,
            migrations_applied: migrations_applied as usize,
            missing_tables,
        };
        if result.is_ok() {
            info!(migrations_applied, "Database validation complete");
        } else {
            warn!(missing = ?result.missing_tables, "Database validation found missing tables");
        }
        Ok(result)
    }

    async fn table_exists(&self, table: &str) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_initialized: bool,
    pub migrations_applied: usize,
    pub missing_tables: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.is_initialized && self.missing_tables.is_empty()
    }

    pub fn summary(&self) -> String {
        if !self.is_initialized {
            "Database not initialized - migrations need to be run".to_string()
        } else if !self.missing_tables.is_empty() {
            format!("Database is missing tables: {}", self.missing_tables.join(", "))
        } else {
            format!("Database OK - {} migrations applied", self.migrations_applied)
        }
    }
}
