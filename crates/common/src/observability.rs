use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static LEADS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "cognicheck_leads_created_total",
        "Total demo-request leads stored"
    )
    .expect("register leads_created_total")
});

pub static USERS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "cognicheck_users_created_total",
        "Total user profiles created"
    )
    .expect("register users_created_total")
});

pub static USERS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "cognicheck_users_updated_total",
        "Total user profile patches applied"
    )
    .expect("register users_updated_total")
});

pub static USERS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "cognicheck_users_deleted_total",
        "Total user profiles deleted"
    )
    .expect("register users_deleted_total")
});

/// Store failures by store name (`leads`, `users`).
pub static STORE_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cognicheck_store_errors_total",
        "Total store read/write failures",
        &["store"]
    )
    .expect("register store_errors_total")
});

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
