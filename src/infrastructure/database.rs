//! 数据库基础设施

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Error,
};
use std::str::FromStr;
use tracing::info;

/// 持有唯一的 SQLite 连接
#[derive(Clone)]
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// 打开数据库文件，不存在时创建
    pub async fn new(database_url: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // 单连接，常驻不回收
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        info!("已连接到数据库: {}", database_url);
        Ok(Self { pool })
    }

    /// 创建 products 表（已存在时跳过）
    pub async fn sync_schema(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                product TEXT NOT NULL,
                price REAL NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 关闭连接，等待进行中的操作结束
    pub async fn close(&self) {
        self.pool.close().await;
        info!("数据库连接已关闭");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sync_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("store.db").display());

        let db = DatabaseManager::new(&url).await.unwrap();
        db.sync_schema().await.unwrap();
        db.sync_schema().await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(db.get_pool())
            .await
            .unwrap();
        assert_eq!(count.0, 0);

        db.close().await;
        assert!(db.get_pool().is_closed());
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("store.db").display());

        let db = DatabaseManager::new(&url).await.unwrap();
        db.sync_schema().await.unwrap();
        sqlx::query("INSERT INTO products (product, price) VALUES (?, ?)")
            .bind("Pen")
            .bind(1.5_f64)
            .execute(db.get_pool())
            .await
            .unwrap();
        db.close().await;

        let db = DatabaseManager::new(&url).await.unwrap();
        db.sync_schema().await.unwrap();
        let row: (String, f64) = sqlx::query_as("SELECT product, price FROM products")
            .fetch_one(db.get_pool())
            .await
            .unwrap();
        assert_eq!(row, ("Pen".to_string(), 1.5));
    }
}
