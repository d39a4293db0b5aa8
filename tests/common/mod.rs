use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use pressroom::db::{DbPool, establish_connection_pool};
use pressroom::models::config::DatabaseConfig;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Temporary SQLite database with the schema applied. The file is removed
/// when the value is dropped.
pub struct TestDb {
    _dir: TempDir,
    path: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(name).to_string_lossy().into_owned();

        let settings = DatabaseConfig {
            max_size: 4,
            min_idle: 1,
            ..DatabaseConfig::default()
        };
        let pool = establish_connection_pool(&path, &settings).expect("failed to build pool");

        let mut conn = pool.get().expect("failed to get connection");
        let conn: &mut SqliteConnection = &mut conn;
        conn.run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &str {
        &self.path
    }
}
