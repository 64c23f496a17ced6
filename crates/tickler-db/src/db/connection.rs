use std::future::Future;
use std::pin::Pin;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection, RunError};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::db::DbProvider;
use crate::error::{DbError, DbResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

pub type AsyncSqliteConnection = SyncConnectionWrapper<SqliteConnection>;
pub type DbPool = Pool<AsyncSqliteConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncSqliteConnection>;

type SetupFuture<'a> =
    Pin<Box<dyn Future<Output = ConnectionResult<AsyncSqliteConnection>> + Send + 'a>>;

fn establish_connection(database_url: &str) -> SetupFuture<'_> {
    Box::pin(async move {
        let mut conn = AsyncSqliteConnection::establish(database_url).await?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    })
}

/// ## Summary
/// Creates a new database connection pool.
///
/// ## Errors
/// Returns an error if the first connections to `database_url` cannot be opened.
#[tracing::instrument(skip(database_url), fields(pool_size = size))]
pub async fn create_pool(database_url: &str, size: u32) -> DbResult<DbPool> {
    tracing::debug!("Creating database connection pool");

    let mut config = ManagerConfig::default();
    config.custom_setup = Box::new(establish_connection);
    let manager = AsyncDieselConnectionManager::<AsyncSqliteConnection>::new_with_config(
        database_url,
        config,
    );

    let pool = Pool::builder()
        .max_size(size)
        .min_idle(Some(size))
        .test_on_check_out(false)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)
        .await
        .map_err(RunError::User)?;

    tracing::info!(
        pool_size = size,
        "Database connection pool created successfully"
    );

    Ok(pool)
}

/// ## Summary
/// Creates the database file if needed, switches it to WAL journaling and applies
/// pending migrations.
///
/// ## Errors
/// Returns an error if the database cannot be opened or a migration fails.
#[tracing::instrument(skip(database_url))]
pub async fn run_migrations(database_url: &str) -> DbResult<()> {
    let url = database_url.to_string();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = SqliteConnection::establish(&url)?;
        conn.batch_execute("PRAGMA journal_mode = WAL;")?;
        let versions = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::MigrationError(e.to_string()))?;
        Ok::<_, DbError>(versions.len())
    })
    .await??;

    tracing::info!(applied, "Database migrations up to date");
    Ok(())
}

impl DbProvider for DbPool {
    #[tracing::instrument(skip(self))]
    fn get_connection<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>> {
        Box::pin(async move {
            let conn = self.get().await?;
            Ok(conn)
        })
    }
}
