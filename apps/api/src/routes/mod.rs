pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

/// Room for multipart framing around a maximum-size photo.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let photo_limit = state.config.max_photo_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(handlers::handle_list_templates))
        // Resumes
        .route(
            "/api/v1/resumes",
            post(handlers::handle_create_resume).get(handlers::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get_resume)
                .put(handlers::handle_update_resume)
                .delete(handlers::handle_delete_resume),
        )
        .route("/api/v1/resumes/:id/draft", put(handlers::handle_save_draft))
        // Section ordering
        .route(
            "/api/v1/resumes/:id/sections/move",
            post(handlers::handle_move_section),
        )
        .route(
            "/api/v1/resumes/:id/sections/drop",
            post(handlers::handle_drop_section),
        )
        // Rendering
        .route(
            "/api/v1/resumes/:id/preview",
            get(handlers::handle_preview_resume),
        )
        .route("/api/v1/resumes/:id/pdf", get(handlers::handle_export_pdf))
        .route("/api/v1/render/preview", post(handlers::handle_render_preview))
        // Photos
        .route(
            "/api/v1/photos",
            post(handlers::handle_upload_photo).layer(DefaultBodyLimit::max(photo_limit)),
        )
        .with_state(state)
}
