//! Shared helpers for integration tests.
#![allow(dead_code)]

use barber_desk::db::{DbPool, establish_connection_pool, run_migrations};
use barber_desk::repository::DieselRepository;
use tempfile::TempDir;

/// SQLite database living in a temporary directory, migrated on creation and
/// removed when dropped.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 path").to_string();
        let pool = establish_connection_pool(&url).expect("pool");
        run_migrations(&pool).expect("migrations");
        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}
