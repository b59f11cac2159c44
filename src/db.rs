use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{AppResult, include_res};

pub async fn connect(url: &str) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect_with(options)
        .await?;

    Ok(db_pool)
}

/// Single-connection in-memory database, ready for the integration
/// tests. More than one connection would mean more than one database.
pub async fn connect_in_memory() -> AppResult<SqlitePool> {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    init_schema(&db_pool).await?;
    Ok(db_pool)
}

/// Creates the tables on startup if they aren't there yet.
pub async fn init_schema(db_pool: &SqlitePool) -> AppResult<()> {
    sqlx::raw_sql(include_res!(str, "/schema.sql"))
        .execute(db_pool)
        .await?;
    Ok(())
}
