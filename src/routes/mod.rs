pub mod announcements;
pub mod health;
pub mod metrics;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// All HTTP routes. CORS is layered on by the binary.
pub fn router(state: AppState) -> Router {
    let collection = get(announcements::list_active).post(announcements::create_announcement);
    let item = put(announcements::update_announcement).delete(announcements::delete_announcement);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        // Announcements
        .route("/announcements", collection.clone())
        .route("/announcements/", collection)
        .route("/announcements/manage", get(announcements::list_all))
        .route("/announcements/{id}", item)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
