//! # 商品存储服务
//!
//! 基于 Axum 与 SQLite 的商品 CRUD 服务：
//! - `app`：路由、处理器与商品存储访问
//! - `core`：统一错误、响应与中间件
//! - `infrastructure`：配置、数据库连接与日志

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{create_router, AppState};
pub use crate::core::error::CoreError;
