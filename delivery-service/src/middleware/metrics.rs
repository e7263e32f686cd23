//! Request counting middleware.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::services::metrics;

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_string();
    let response = next.run(req).await;
    metrics::record_request(&method, response.status().as_u16());
    response
}
