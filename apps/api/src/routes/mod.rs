pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless scoring
        .route("/api/v1/screen", post(handlers::handle_screen))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/keywords",
            get(handlers::handle_get_keywords)
                .put(handlers::handle_replace_keywords)
                .post(handlers::handle_add_keyword)
                .delete(handlers::handle_remove_keyword),
        )
        .route(
            "/api/v1/sessions/:id/documents",
            get(handlers::handle_list_documents).post(handlers::handle_upload_documents),
        )
        // Analysis
        .route("/api/v1/sessions/:id/analyze", post(handlers::handle_analyze))
        .route("/api/v1/sessions/:id/results", get(handlers::handle_get_results))
        .route("/api/v1/sessions/:id/dashboard", get(handlers::handle_dashboard))
        .route("/api/v1/sessions/:id/compare", get(handlers::handle_compare))
        .route(
            "/api/v1/sessions/:id/results/:file_name/suggestions",
            get(handlers::handle_suggestions),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
