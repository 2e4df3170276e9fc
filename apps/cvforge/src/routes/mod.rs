pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::cv::handlers as cv;
use crate::cv::photo::MAX_PHOTO_BYTES;
use crate::export::handlers as export;
use crate::improve::handlers as improve;
use crate::render::handlers as render;
use crate::state::AppState;

/// Multipart framing overhead allowed on top of the photo itself.
const PHOTO_UPLOAD_SLACK: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV record
        .route("/api/v1/cv", get(cv::handle_get_cv))
        .route("/api/v1/cv/personal", patch(cv::handle_update_personal))
        .route(
            "/api/v1/cv/photo",
            put(cv::handle_set_photo)
                .delete(cv::handle_clear_photo)
                .layer(DefaultBodyLimit::max(MAX_PHOTO_BYTES + PHOTO_UPLOAD_SLACK)),
        )
        .route("/api/v1/cv/summary", put(cv::handle_update_summary))
        .route("/api/v1/cv/entries/:kind", post(cv::handle_add_entry))
        .route(
            "/api/v1/cv/entries/:kind/:id",
            patch(cv::handle_update_entry).delete(cv::handle_remove_entry),
        )
        .route(
            "/api/v1/cv/skills",
            put(cv::handle_set_skills).post(cv::handle_add_skill),
        )
        .route(
            "/api/v1/cv/skills/:skill",
            axum::routing::delete(cv::handle_remove_skill),
        )
        // Layout + preview
        .route(
            "/api/v1/layout",
            get(render::handle_get_layout).put(render::handle_set_layout),
        )
        .route("/api/v1/preview", get(render::handle_preview))
        // Text improvement
        .route("/api/v1/improve", post(improve::handle_improve))
        .route("/api/v1/improve/status", get(improve::handle_improve_status))
        // Export
        .route("/api/v1/export", get(export::handle_export))
        .with_state(state)
}
