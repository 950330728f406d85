//! Request correlation middleware
//!
//! Every request gets an `X-Request-Id`: inbound values are reused so ids
//! survive proxies, otherwise a UUID v4 is minted. The id rides in request
//! extensions, in a span around the whole request, and in the response
//! headers.

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id as seen by handlers, via `Extension<RequestId>`.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

fn incoming_or_minted(request: &Request<Body>) -> String {
    match request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(id) => id.to_owned(),
        None => Uuid::new_v4().to_string(),
    }
}

pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = incoming_or_minted(&request);
    request.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %request.method(),
        uri = %request.uri(),
    );

    // instrument rather than enter: the span must follow the future across
    // await points
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
