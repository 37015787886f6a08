pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::review::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Review API
        .route("/api/v1/review", post(handlers::handle_review))
        .route(
            "/api/v1/review/upload",
            post(handlers::handle_review_upload),
        )
        // Download API
        .route("/api/v1/render/pdf", post(handlers::handle_render_pdf))
        .with_state(state)
}
