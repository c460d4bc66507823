//! 商品存储访问
//!
//! 每个方法对应一条 SQL 语句，错误原样交给调用方。

use sqlx::SqlitePool;

use super::model::{Product, ProductPayload};
use crate::core::error::CoreError;
use crate::infrastructure::database::DatabaseManager;

#[derive(Clone)]
pub struct ProductService {
    pool: SqlitePool,
}

impl ProductService {
    pub fn new(db: &DatabaseManager) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }

    /// 按 id 升序返回全部商品
    pub async fn find_all(&self) -> Result<Vec<Product>, CoreError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT id, product, price FROM products ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(products)
    }

    pub async fn create(&self, payload: ProductPayload) -> Result<Product, CoreError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (product, price) VALUES (?, ?) RETURNING id, product, price",
        )
        .bind(&payload.product)
        .bind(payload.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>, CoreError> {
        let product =
            sqlx::query_as::<_, Product>("SELECT id, product, price FROM products WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(product)
    }

    /// 写回已有行的名称和价格
    pub async fn save(&self, product: &Product) -> Result<(), CoreError> {
        sqlx::query("UPDATE products SET product = ?, price = ? WHERE id = ?")
            .bind(&product.product)
            .bind(product.price)
            .bind(product.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> (tempfile::TempDir, DatabaseManager, ProductService) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("store.db").display());
        let db = DatabaseManager::new(&url).await.unwrap();
        db.sync_schema().await.unwrap();
        let service = ProductService::new(&db);
        (dir, db, service)
    }

    fn payload(name: &str, price: f64) -> ProductPayload {
        ProductPayload {
            product: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let (_dir, _db, service) = setup().await;

        let first = service.create(payload("Pen", 1.5)).await.unwrap();
        let second = service.create(payload("Pen", 2.0)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.product, second.product);

        let all = service.find_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let (_dir, _db, service) = setup().await;
        assert!(service.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_updates_in_place() {
        let (_dir, _db, service) = setup().await;

        let mut product = service.create(payload("Pen", 1.5)).await.unwrap();
        product.apply(payload("Marker", 3.25));
        service.save(&product).await.unwrap();

        let stored = service.find_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(stored, product);
        assert_eq!(service.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (_dir, _db, service) = setup().await;

        let keep = service.create(payload("Pen", 1.5)).await.unwrap();
        let gone = service.create(payload("Ink", 4.0)).await.unwrap();
        service.delete(gone.id).await.unwrap();

        assert!(service.find_by_id(gone.id).await.unwrap().is_none());
        assert_eq!(service.find_all().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_closed_pool_reports_storage_error() {
        let (_dir, db, service) = setup().await;
        db.close().await;

        let err = service.find_all().await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
    }
}
