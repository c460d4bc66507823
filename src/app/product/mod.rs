//! 商品 CRUD

pub mod handler;
pub mod model;
pub mod service;

pub use handler::AppState;
pub use model::{Product, ProductPayload};
pub use service::ProductService;
