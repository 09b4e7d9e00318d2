use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

use crate::error::{AppError, AppResult};

lazy_static! {
    pub static ref ANNOUNCEMENT_OPS_COUNTER: CounterVec = register_counter_vec!(
        "announcements_operations_total",
        "Announcement mutations by operation and outcome",
        &["operation", "outcome"]
    ).unwrap();
}

/// Count one mutation: `ok`, `rejected` (client error) or `error` (store failure).
pub fn observe<T>(operation: &str, result: &AppResult<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(AppError::Internal(_)) => "error",
        Err(_) => "rejected",
    };
    ANNOUNCEMENT_OPS_COUNTER
        .with_label_values(&[operation, outcome])
        .inc();
}
