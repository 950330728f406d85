//! Session API handlers
//!
//! Login is the only public route here; the rest run behind the auth
//! middleware and act on the caller's own bearer token, taken from the
//! request extensions rather than re-parsed from the header.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{AccountInfo, LoginRequest, RevokedSessions, SessionResponse};
use crate::application::AuthService;
use crate::interfaces::http::common::{error_response, ApiResponse};
use crate::interfaces::http::middleware::BearerToken;

/// Session handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: Arc<AuthService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<SessionResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, (StatusCode, Json<ApiResponse<SessionResponse>>)> {
    let auth = state
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(SessionResponse::from(auth))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session revoked"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<AuthHandlerState>,
    Extension(token): Extension<BearerToken>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.auth.logout(&token.0).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout-all",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All sessions revoked", body = ApiResponse<RevokedSessions>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout_all(
    State(state): State<AuthHandlerState>,
    Extension(token): Extension<BearerToken>,
) -> Result<Json<ApiResponse<RevokedSessions>>, (StatusCode, Json<ApiResponse<RevokedSessions>>)> {
    let revoked = state
        .auth
        .logout_all(&token.0)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(RevokedSessions { revoked })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Fresh token issued", body = ApiResponse<SessionResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn refresh(
    State(state): State<AuthHandlerState>,
    Extension(token): Extension<BearerToken>,
) -> Result<Json<ApiResponse<SessionResponse>>, (StatusCode, Json<ApiResponse<SessionResponse>>)> {
    let auth = state.auth.refresh(&token.0).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(SessionResponse::from(auth))))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = ApiResponse<AccountInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AuthHandlerState>,
    Extension(token): Extension<BearerToken>,
) -> Result<Json<ApiResponse<AccountInfo>>, (StatusCode, Json<ApiResponse<AccountInfo>>)> {
    let user = state
        .auth
        .current_user(&token.0)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(AccountInfo::from(user))))
}
