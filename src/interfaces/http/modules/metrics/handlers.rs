//! Prometheus scrape endpoint
//!
//! Renders every instrument registered with the global
//! `metrics-exporter-prometheus` recorder installed at startup.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus text exposition format.
const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// State carrying the installed recorder's render handle.
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics`. Unauthenticated so the scraper needs no session.
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.handle.render(),
    )
        .into_response()
}
