//! User management API handlers
//!
//! The whole router is gated to admin-level callers; per-record tenancy is
//! enforced by `UserService` against the resolved `Principal`. Creation is
//! the exception (the service keeps it guard-free for signup bootstrap), so
//! the cross-company check runs here before delegating.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateUserRequest, ListUsersParams, UpdateUserRequest, UserDto};
use crate::application::access::{ensure_same_company_or_super_admin, Principal};
use crate::application::UserService;
use crate::domain::values::UserId;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::shared::validations::validate_pagination;

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub users: Arc<UserService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list, scoped to the caller's company for admins", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListUsersParams>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<UserDto>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<UserDto>>>),
> {
    let page = validate_pagination(params.page, params.limit);
    let result = match params.search.as_deref() {
        Some(query) => state.users.search(&principal, query, page).await,
        None => state.users.list(&principal, page).await,
    }
    .map_err(error_response)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from(
        result.map(UserDto::from),
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 403, description = "Cross-company access"),
        (status = 409, description = "Email already exists"),
        (status = 422, description = "Validation error or user limit reached")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    let dto = request.into_domain().map_err(error_response)?;

    // admins may only provision into their own company
    ensure_same_company_or_super_admin(&principal, dto.company_id).map_err(error_response)?;

    let user = state.users.create(dto).await.map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 403, description = "Cross-company access"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let user = state
        .users
        .get(&principal, UserId::new(id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 403, description = "Cross-company access"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let dto = request.into_domain().map_err(error_response)?;
    let user = state
        .users
        .update(&principal, UserId::new(id), dto)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User soft-deleted"),
        (status = 403, description = "Cross-company access"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Already deleted")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .users
        .delete(&principal, UserId::new(id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/restore",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User restored", body = ApiResponse<UserDto>),
        (status = 403, description = "Cross-company access"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Not deleted")
    )
)]
pub async fn restore_user(
    State(state): State<UserHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let user = state
        .users
        .restore(&principal, UserId::new(id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}
