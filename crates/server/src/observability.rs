use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static STUDENT_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "student_requests_total",
        "Student operations handled, by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register student_requests_total")
});

/// Count one finished operation under its outcome label.
pub fn record<T>(operation: &str, result: &Result<T, ServiceError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(ServiceError::Validation(_)) => "validation",
        Err(ServiceError::BadRequest(_)) => "bad_request",
        Err(ServiceError::Conflict(_)) => "conflict",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(ServiceError::Store(_)) => "store_error",
    };
    STUDENT_REQUESTS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}
