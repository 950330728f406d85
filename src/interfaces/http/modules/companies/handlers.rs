//! Company (tenant) API handlers
//!
//! Signup is the only public write in the whole API: it registers the
//! company, provisions the bootstrap admin and starts the first
//! subscription in one call. Every other route runs behind the bearer
//! middleware; record-level tenancy is enforced by `CompanyService`,
//! so an admin can manage their own company while super-admins see all.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    ChangePlanRequest, CompanyDto, CreateCompanyRequest, CreatedCompanyResponse,
    ListCompaniesParams, SubscriptionDto, UpdateCompanyRequest,
};
use crate::application::access::{require_super_admin, Principal};
use crate::application::CompanyService;
use crate::domain::values::{CompanyId, PlanId};
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, PaginationQuery, ValidatedJson,
};
use crate::shared::validations::validate_pagination;

/// Company handler state
#[derive(Clone)]
pub struct CompanyHandlerState {
    pub companies: Arc<CompanyService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/companies",
    tag = "Companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company registered with admin account and subscription", body = ApiResponse<CreatedCompanyResponse>),
        (status = 404, description = "Plan not found"),
        (status = 409, description = "Admin email already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_company(
    State(state): State<CompanyHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateCompanyRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<CreatedCompanyResponse>>),
    (StatusCode, Json<ApiResponse<CreatedCompanyResponse>>),
> {
    let dto = request.into_domain().map_err(error_response)?;
    let created = state.companies.create(dto).await.map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreatedCompanyResponse::from(created))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(ListCompaniesParams),
    responses(
        (status = 200, description = "Company list across all tenants", body = ApiResponse<PaginatedResponse<CompanyDto>>),
        (status = 403, description = "Super-admin access required")
    )
)]
pub async fn list_companies(
    State(state): State<CompanyHandlerState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListCompaniesParams>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<CompanyDto>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<CompanyDto>>>),
> {
    let page = validate_pagination(params.page, params.limit);
    let result = match (params.search.as_deref(), params.filter.as_deref()) {
        (Some(query), _) => state.companies.search(&principal, query, page).await,
        (None, Some("active")) => state.companies.list_active(&principal, page).await,
        (None, Some("deleted")) => state.companies.list_deleted(&principal, page).await,
        (None, _) => state.companies.list(&principal, page).await,
    }
    .map_err(error_response)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from(
        result.map(CompanyDto::from),
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company details", body = ApiResponse<CompanyDto>),
        (status = 403, description = "Cross-company access"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_company(
    State(state): State<CompanyHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CompanyDto>>, (StatusCode, Json<ApiResponse<CompanyDto>>)> {
    let company = state
        .companies
        .get(&principal, CompanyId::new(id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(CompanyDto::from(company))))
}

#[utoipa::path(
    put,
    path = "/api/v1/companies/{id}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Company ID")),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = ApiResponse<CompanyDto>),
        (status = 403, description = "Cross-company access"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_company(
    State(state): State<CompanyHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyDto>>, (StatusCode, Json<ApiResponse<CompanyDto>>)> {
    let dto = request.into_domain().map_err(error_response)?;
    let company = state
        .companies
        .update(&principal, CompanyId::new(id), dto)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(CompanyDto::from(company))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company soft-deleted"),
        (status = 403, description = "Cross-company access"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Already deleted")
    )
)]
pub async fn delete_company(
    State(state): State<CompanyHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .companies
        .delete(&principal, CompanyId::new(id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    post,
    path = "/api/v1/companies/{id}/restore",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company restored", body = ApiResponse<CompanyDto>),
        (status = 403, description = "Super-admin access required"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Not deleted")
    )
)]
pub async fn restore_company(
    State(state): State<CompanyHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CompanyDto>>, (StatusCode, Json<ApiResponse<CompanyDto>>)> {
    // a deleted company has no active admins, so only super-admins revive it
    require_super_admin(&principal).map_err(error_response)?;
    let company = state
        .companies
        .restore(&principal, CompanyId::new(id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(CompanyDto::from(company))))
}

#[utoipa::path(
    post,
    path = "/api/v1/companies/{id}/change-plan",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Company ID")),
    request_body = ChangePlanRequest,
    responses(
        (status = 200, description = "Subscription switched to the new plan", body = ApiResponse<SubscriptionDto>),
        (status = 403, description = "Cross-company access"),
        (status = 404, description = "Company or plan not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn change_plan(
    State(state): State<CompanyHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<ChangePlanRequest>,
) -> Result<Json<ApiResponse<SubscriptionDto>>, (StatusCode, Json<ApiResponse<SubscriptionDto>>)> {
    let subscription = state
        .companies
        .change_plan(&principal, CompanyId::new(id), PlanId::new(request.plan_id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(SubscriptionDto::from(
        subscription,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}/subscriptions",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Company ID"), PaginationQuery),
    responses(
        (status = 200, description = "Subscription history, oldest first", body = ApiResponse<PaginatedResponse<SubscriptionDto>>),
        (status = 403, description = "Cross-company access"),
        (status = 404, description = "Not found")
    )
)]
pub async fn list_subscriptions(
    State(state): State<CompanyHandlerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<SubscriptionDto>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<SubscriptionDto>>>),
> {
    let result = state
        .companies
        .subscriptions(&principal, CompanyId::new(id), pagination.clamped())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from(
        result.map(SubscriptionDto::from),
    ))))
}
