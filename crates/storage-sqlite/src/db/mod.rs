use chrono::Local;
use log::{error, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use diesel::connection::{Connection, SimpleConnection};
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::{IntoCore, StorageError};
use bucketlist_core::errors::{DatabaseError, Error, Result};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Prepares the database file at `db_path` and returns the path in use.
///
/// `DATABASE_URL`, when set, takes precedence over `db_path`.
pub fn init(db_path: &str) -> Result<String> {
    let db_path = get_db_path(db_path);

    if let Some(db_dir) = Path::new(&db_path).parent() {
        if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
            fs::create_dir_all(db_dir)?;
        }
    }

    {
        let mut conn = SqliteConnection::establish(&db_path).into_core()?;
        conn.batch_execute(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous  = NORMAL;
        ",
        )
        .into_core()?;
    }

    Ok(db_path)
}

pub fn get_db_path(db_path: &str) -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| db_path.to_string())
}

pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = r2d2::Pool::builder()
        .max_size(8)
        .min_idle(Some(1)) // Keep at least one connection ready
        .connection_timeout(std::time::Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionCustomizer {}))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Running database migrations");
    let mut connection = get_connection(pool)?;

    let result = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        Error::from(StorageError::MigrationFailed(e.to_string()))
    })?;

    if result.is_empty() {
        info!("No pending migrations to apply.");
    } else {
        info!("Applied the following migrations:");
        for migration_version in &result {
            info!("  - {}", migration_version);
        }
    }

    Ok(())
}

/// Gets a connection from the pool
pub fn get_connection(pool: &Pool<ConnectionManager<SqliteConnection>>) -> Result<DbConnection> {
    pool.get().into_core()
}

/// Copies the database (and its WAL/SHM side files, if present) to a
/// timestamped file under a `backups` directory next to it. Returns the
/// backup path.
pub fn backup_database(db_path: &str) -> Result<String> {
    let data_dir = Path::new(db_path)
        .parent()
        .unwrap_or_else(|| Path::new("."));
    let backup_dir = data_dir.join("backups");
    fs::create_dir_all(&backup_dir).map_err(|e| {
        error!("Failed to create backup directory: {}", e);
        Error::Database(DatabaseError::BackupFailed(e.to_string()))
    })?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S_%6f").to_string();
    let mut backup_file = backup_dir.join(format!("bucketlist_backup_{}.db", timestamp));
    let mut attempt = 1;
    while backup_file.exists() {
        backup_file = backup_dir.join(format!("bucketlist_backup_{}_{}.db", timestamp, attempt));
        attempt += 1;
    }
    let backup_path = backup_file.to_string_lossy().to_string();

    info!(
        "Creating database backup from {} to {}",
        db_path, backup_path
    );

    fs::copy(db_path, &backup_path).map_err(|e| {
        error!("Failed to create database backup: {}", e);
        Error::Database(DatabaseError::BackupFailed(e.to_string()))
    })?;

    for suffix in ["-wal", "-shm"] {
        let source = format!("{}{}", db_path, suffix);
        if Path::new(&source).exists() {
            fs::copy(&source, format!("{}{}", backup_path, suffix)).map_err(|e| {
                error!("Failed to copy {} file: {}", suffix, e);
                Error::Database(DatabaseError::BackupFailed(e.to_string()))
            })?;
        }
    }

    info!("Database backup created successfully");
    Ok(backup_path)
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous = NORMAL;
        ",
        )
        .map_err(diesel::r2d2::Error::QueryError)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_lands_next_to_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("app.db");
        let db_path = db_path.to_str().unwrap();
        let pool = create_pool(db_path).unwrap();
        run_migrations(&pool).unwrap();

        let backup_path = backup_database(db_path).unwrap();

        assert!(Path::new(&backup_path).exists());
        assert!(backup_path.starts_with(dir.path().join("backups").to_str().unwrap()));
    }

    #[test]
    fn test_back_to_back_backups_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("app.db");
        let db_path = db_path.to_str().unwrap();
        let pool = create_pool(db_path).unwrap();
        run_migrations(&pool).unwrap();

        let paths: Vec<String> = (0..5).map(|_| backup_database(db_path).unwrap()).collect();

        let mut unique = paths.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), paths.len());
        assert!(paths.iter().all(|p| Path::new(p).exists()));
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("app.db");
        let pool = create_pool(db_path.to_str().unwrap()).unwrap();

        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
    }
}
