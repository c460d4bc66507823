//! 应用层：路由与处理器

pub mod product;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::core::middleware::request_logging_middleware;
use product::handler::{create_product, delete_product, list_products, update_product};

pub use product::AppState;

/// 构建完整路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/:id", put(update_product).delete(delete_product))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
