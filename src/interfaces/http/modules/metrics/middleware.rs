//! HTTP request metrics middleware
//!
//! Records `http_requests_total` (counter) and `http_request_duration_seconds`
//! (histogram) for every request passing through the router. Labels use the
//! matched route pattern, not the raw URI, so `/api/v1/users/42` and
//! `/api/v1/users/7` land in the same series.

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

/// The matched route pattern when routing succeeded, the raw path otherwise
/// (404s and the like).
fn route_template(request: &Request<Body>) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => request.uri().path().to_owned(),
    }
}

pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let route = route_template(&request);
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    let elapsed = started.elapsed().as_secs_f64();

    metrics::histogram!("http_request_duration_seconds", "method" => method.clone(), "path" => route.clone())
        .record(elapsed);
    metrics::counter!("http_requests_total", "method" => method, "path" => route, "status" => status)
        .increment(1);

    response
}
