//! Authentication middleware for Axum
//!
//! Resolves `Authorization: Bearer <token>` to a [`Principal`] through the
//! auth service and injects it (plus the raw token, which the logout and
//! refresh handlers need) into request extensions. Role gates stack on top
//! of it as plain middleware reading the extension.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::access::Principal;
use crate::application::AuthService;
use crate::domain::user::Role;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    InsufficientPermissions,
}

/// State for the authentication middleware
#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<AuthService>,
}

/// The raw bearer token as presented, stored in request extensions so
/// session handlers can operate on the caller's own token.
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Bearer-token authentication middleware
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match state.auth.authenticate(token).await {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            request.extensions_mut().insert(BearerToken(token.into()));
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Admin-or-above gate. Must run after `auth_middleware`.
pub async fn admin_level_middleware(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<Principal>() {
        Some(principal) if principal.role.is_admin_level() => next.run(request).await,
        Some(_) => auth_error_response(AuthError::InsufficientPermissions),
        None => auth_error_response(AuthError::MissingToken),
    }
}

/// Super-admin-only gate. Must run after `auth_middleware`.
pub async fn super_admin_middleware(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<Principal>() {
        Some(principal) if principal.role == Role::SuperAdmin => next.run(request).await,
        Some(_) => auth_error_response(AuthError::InsufficientPermissions),
        None => auth_error_response(AuthError::MissingToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}

// ── Tests ──────────────────────────────────────────────────────
