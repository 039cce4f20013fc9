//! Route table and middleware.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let dashboard = ServeFile::new(&state.dashboard);
    let cors = state.cors;

    let mut router = Router::new()
        .route_service("/", dashboard)
        .route("/api/status", get(handlers::status))
        .route("/api/topics", get(handlers::list_topics))
        .route("/api/topics/{id}", get(handlers::get_topic))
        .route("/api/topics/{id}/status", put(handlers::update_topic_status))
        .route("/api/pipeline/start", post(handlers::start_pipeline))
        .route("/api/pipeline/stop", post(handlers::stop_pipeline))
        .route("/api/pipeline/status", get(handlers::pipeline_status))
        .route("/api/pipeline/stages/{id}", put(handlers::update_stage))
        .route(
            "/api/logs",
            get(handlers::list_logs)
                .delete(handlers::clear_logs)
                .post(handlers::add_log),
        )
        .route("/api/export/topics", get(handlers::export_topics))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
