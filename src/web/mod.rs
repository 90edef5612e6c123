//! Web 层
//!
//! - `GET /`：空表单
//! - `POST /`：提交作文（表单字段 `essay`）
//! - `GET /health`：存活检查

pub mod handlers;
pub mod render;
pub mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::web::state::AppState;

/// Build the Axum router with all routes
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/health", get(handlers::health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
