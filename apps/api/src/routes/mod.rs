pub mod health;
pub mod session;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::criteria::handlers::handle_extract_criteria;
use crate::scoring::handlers::handle_score_resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/extract-criteria", post(handle_extract_criteria))
        .route("/score-resumes", post(handle_score_resumes))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
