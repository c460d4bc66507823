//! 商品数据模型

use serde::{Deserialize, Serialize};

/// 商品记录，`id` 由存储分配后不再改变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub product: String,
    pub price: f64,
}

/// 创建与更新共用的请求体，客户端传入的 `id` 会被忽略，缺省字段取零值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductPayload {
    pub product: String,
    pub price: f64,
}

impl Product {
    /// 用请求体覆盖名称和价格，保留 id
    pub fn apply(&mut self, payload: ProductPayload) {
        self.product = payload.product;
        self.price = payload.price;
    }
}
