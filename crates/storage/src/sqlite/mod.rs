use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{ClientRepository, Storage, TemplateRepository};

mod client_repo;
mod mapping;
mod migrate;
mod template_repo;

const FILE_POOL_SIZE: u32 = 4;

/// Client and template persistence over one `SQLite` pool.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Where the database lives, judged from its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DbLocation {
    File,
    /// Shared-cache memory database; survives while one connection is open.
    SharedMemory,
    /// Private memory database; every connection would see a different one.
    PrivateMemory,
}

impl DbLocation {
    fn of(database_url: &str) -> Self {
        let in_memory = database_url == "sqlite::memory:"
            || database_url.contains(":memory:")
            || database_url.contains("mode=memory");
        if !in_memory {
            DbLocation::File
        } else if database_url.contains("cache=shared") {
            DbLocation::SharedMemory
        } else {
            DbLocation::PrivateMemory
        }
    }

    fn pool_options(self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));
        match self {
            DbLocation::File => options.max_connections(FILE_POOL_SIZE),
            DbLocation::SharedMemory => options
                .max_connections(FILE_POOL_SIZE)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
            DbLocation::PrivateMemory => options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
        }
    }
}

impl SqliteRepository {
    /// Connect to `SQLite` using the given URL.
    ///
    /// Memory databases keep a pinned connection so their contents outlive
    /// idle periods.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the connection cannot be established or a
    /// connection pragma fails.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let location = DbLocation::of(database_url);
        let pool = location
            .pool_options()
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    if location == DbLocation::File {
                        sqlx::query("PRAGMA journal_mode = WAL;")
                            .execute(&mut *conn)
                            .await?;
                    }
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        tracing::debug!(url = database_url, ?location, "connected to sqlite");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create or upgrade the portal tables.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Open, migrate and wrap a `SQLite` database as both repositories.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        let clients: Arc<dyn ClientRepository> = Arc::new(repo.clone());
        let templates: Arc<dyn TemplateRepository> = Arc::new(repo);
        Ok(Self { clients, templates })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::mock::mock_clients;

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteRepository>();
    }

    #[test]
    fn location_is_read_from_the_url() {
        assert_eq!(DbLocation::of("sqlite:///var/portal.sqlite3"), DbLocation::File);
        assert_eq!(DbLocation::of("sqlite:portal.sqlite3?mode=rwc"), DbLocation::File);
        assert_eq!(DbLocation::of("sqlite::memory:"), DbLocation::PrivateMemory);
        assert_eq!(
            DbLocation::of("sqlite:file:portal?mode=memory&cache=shared"),
            DbLocation::SharedMemory
        );
    }

    #[tokio::test]
    async fn private_memory_database_keeps_records_between_queries() {
        let storage = Storage::sqlite("sqlite::memory:").await.unwrap();
        let clients = mock_clients().unwrap();
        storage.clients.insert_client(&clients[0]).await.unwrap();

        let listed = storage.clients.list_clients().await.unwrap();
        assert_eq!(listed, vec![clients[0].clone()]);
        assert_eq!(storage.templates.load_templates().await.unwrap().len(), 5);
    }
}
