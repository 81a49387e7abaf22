use tracing::{info, warn};

use crate::database::{get_db_pool, DatabasePool};
use super::in_memory::InMemoryStorage;

/// Where repositories keep their rows.
///
/// Clones share the same underlying store, so a patient repository and a
/// reading repository built from one backend see each other's writes.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Pooled SQLite database
    Sqlite(DatabasePool),
    /// Process-local storage used when no database is available
    Memory(InMemoryStorage),
}

impl StorageBackend {
    /// Use the global pool if it was initialized, otherwise fall back to memory
    pub fn from_global() -> Self {
        match get_db_pool() {
            Ok(pool) => {
                info!("Using {}", pool.describe());
                StorageBackend::Sqlite(pool)
            }
            Err(e) => {
                warn!("Database not available ({}), using in-memory storage", e);
                StorageBackend::Memory(InMemoryStorage::new())
            }
        }
    }

    /// Back repositories with an explicit pool
    pub fn sqlite(pool: DatabasePool) -> Self {
        StorageBackend::Sqlite(pool)
    }

    /// Back repositories with fresh in-memory storage
    pub fn in_memory() -> Self {
        StorageBackend::Memory(InMemoryStorage::new())
    }
}
