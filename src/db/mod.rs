use std::path::Path;

use log::info;
use sqlx::sqlite::*;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

pub mod crud;
pub mod model;

pub use model::*;

pub type Database = SqlitePool;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("person {0} not found")]
    NotFound(Uuid),
    #[error("corrupt vector of person {id}: {len} bytes is not a multiple of 8")]
    CorruptVector { id: Uuid, len: usize },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub async fn init_db(filename: impl AsRef<Path>) -> Result<Database, DbError> {
    let filename = filename.as_ref();
    info!("初始化数据库连接: {}", filename.display());

    let options = SqliteConnectOptions::new()
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .filename(filename)
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;
    migrate(&pool).await?;

    Ok(pool)
}

/// 创建内存数据库，只保留一个连接，否则每个连接都会看到不同的数据库
pub async fn init_memory_db() -> Result<Database, DbError> {
    let options: SqliteConnectOptions = "sqlite::memory:".parse()?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    migrate(&pool).await?;

    Ok(pool)
}

async fn migrate(pool: &Database) -> Result<(), DbError> {
    info!("检查数据库迁移");
    sqlx::migrate!().run(pool).await?;
    Ok(())
}
