//! 商品处理器

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;

use super::{
    model::{Product, ProductPayload},
    service::ProductService,
};
use crate::core::{error::CoreError, response::MessageResponse};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

/// 无法解析的 id 与不存在的 id 同样处理
async fn load_product(
    service: &ProductService,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Product, CoreError> {
    let not_found = || CoreError::NotFound("商品未找到".to_string());
    let Path(id) = id.map_err(|_| not_found())?;
    service.find_by_id(id).await?.ok_or_else(not_found)
}

/// 按 JSON 解码请求体，不检查 Content-Type
fn parse_payload(body: &[u8]) -> Result<ProductPayload, CoreError> {
    serde_json::from_slice(body)
        .map_err(|e| CoreError::BadRequest(format!("请求数据无效: {}", e)))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = state.product_service.find_all().await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let payload = parse_payload(&body)?;
    let product = state.product_service.create(payload).await?;

    info!("已创建商品: {} ({})", product.product, product.id);
    Ok((StatusCode::CREATED, Json(product)))
}

/// 先确认商品存在，再解析请求体
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Product>, CoreError> {
    let mut product = load_product(&state.product_service, id).await?;
    product.apply(parse_payload(&body)?);
    state.product_service.save(&product).await?;

    info!("已更新商品: {} ({})", product.product, product.id);
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, CoreError> {
    let product = load_product(&state.product_service, id).await?;
    state.product_service.delete(product.id).await?;

    info!("已删除商品: {}", product.id);
    Ok(Json(MessageResponse::new("商品已删除")))
}
