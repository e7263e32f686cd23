//! Prometheus metrics for the delivery service.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

use super::policy::{Operation, Resource};

pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static AUTHZ_DENIALS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PAYMENTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

pub fn init_metrics() {
    let registry = Registry::new();

    let requests_counter = IntCounterVec::new(
        Opts::new(
            "delivery_http_requests_total",
            "Total HTTP requests by method and status",
        ),
        &["method", "status"],
    )
    .expect("Failed to create delivery_http_requests_total metric");

    let denials_counter = IntCounterVec::new(
        Opts::new(
            "delivery_authz_denials_total",
            "Authorization denials by resource and operation",
        ),
        &["resource", "operation"],
    )
    .expect("Failed to create delivery_authz_denials_total metric");

    let payments_counter = IntCounterVec::new(
        Opts::new(
            "delivery_payments_total",
            "Gateway payment transactions by status",
        ),
        &["status"],
    )
    .expect("Failed to create delivery_payments_total metric");

    registry
        .register(Box::new(requests_counter.clone()))
        .expect("Failed to register delivery_http_requests_total");
    registry
        .register(Box::new(denials_counter.clone()))
        .expect("Failed to register delivery_authz_denials_total");
    registry
        .register(Box::new(payments_counter.clone()))
        .expect("Failed to register delivery_payments_total");

    PROMETHEUS_REGISTRY
        .set(registry)
        .expect("Failed to set prometheus registry");
    HTTP_REQUESTS_TOTAL
        .set(requests_counter)
        .expect("Failed to set delivery_http_requests_total");
    AUTHZ_DENIALS_TOTAL
        .set(denials_counter)
        .expect("Failed to set delivery_authz_denials_total");
    PAYMENTS_TOTAL
        .set(payments_counter)
        .expect("Failed to set delivery_payments_total");
}

/// Render the registry in Prometheus text format.
pub fn get_metrics() -> String {
    let Some(registry) = PROMETHEUS_REGISTRY.get() else {
        return "# Metrics not initialized\n".to_string();
    };
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer).ok();
    String::from_utf8(buffer).unwrap_or_default()
}

/// Count a served HTTP request.
pub fn record_request(method: &str, status: u16) {
    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        counter
            .with_label_values(&[method, &status.to_string()])
            .inc();
    }
}

/// Count a policy denial.
pub fn record_denial(resource: Resource, operation: Operation) {
    if let Some(counter) = AUTHZ_DENIALS_TOTAL.get() {
        counter
            .with_label_values(&[resource.as_str(), operation.as_str()])
            .inc();
    }
}

/// Count a gateway payment transaction.
pub fn record_payment(status: &str) {
    if let Some(counter) = PAYMENTS_TOTAL.get() {
        counter.with_label_values(&[status]).inc();
    }
}
