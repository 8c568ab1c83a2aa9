#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};

use models::customer;

// Create the customer table at most once per test process
static TABLE_READY: OnceCell<()> = OnceCell::const_new();

/// Live database for tests, or `None` when `DATABASE_URL` is absent or
/// `SKIP_DB_TESTS` is set.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = models::db::connect().await?;
    let conn = &db;
    TABLE_READY
        .get_or_try_init(|| async move {
            let backend = conn.get_database_backend();
            let mut stmt = Schema::new(backend).create_table_from_entity(customer::Entity);
            stmt.if_not_exists();
            conn.execute(backend.build(&stmt)).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;
    Ok(Some(db))
}
