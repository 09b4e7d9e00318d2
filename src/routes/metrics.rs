use axum::http::StatusCode;
use prometheus::{Encoder, TextEncoder};

use crate::services::metrics::ANNOUNCEMENT_OPS_COUNTER;

/// GET /metrics: Prometheus text exposition.
pub async fn metrics_handler() -> Result<String, StatusCode> {
    // Register the counter even before the first mutation so scrapers see it.
    lazy_static::initialize(&ANNOUNCEMENT_OPS_COUNTER);

    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    String::from_utf8(buffer).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
