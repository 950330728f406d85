//! Plan management API handlers
//!
//! The whole router is gated to super-admins; plans are platform-global,
//! so there is no per-record tenancy to check beyond that.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreatePlanRequest, ListPlansParams, PlanDto, UpdatePlanRequest};
use crate::application::PlanService;
use crate::domain::values::PlanId;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::shared::validations::validate_pagination;

/// Plan handler state
#[derive(Clone)]
pub struct PlanHandlerState {
    pub plans: Arc<PlanService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/plans",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(ListPlansParams),
    responses(
        (status = 200, description = "Plan list", body = ApiResponse<PaginatedResponse<PlanDto>>),
        (status = 403, description = "Super-admin access required"),
        (status = 422, description = "Bad price bounds")
    )
)]
pub async fn list_plans(
    State(state): State<PlanHandlerState>,
    Query(params): Query<ListPlansParams>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<PlanDto>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<PlanDto>>>),
> {
    let page = validate_pagination(params.page, params.limit);
    let bounds = params.price_bounds().map_err(error_response)?;

    // precedence: search, then price window, then state filter
    let result = if let Some(query) = params.search.as_deref() {
        state.plans.search(query, page).await
    } else if let Some((min, max)) = bounds {
        state.plans.price_range(min, max, page).await
    } else {
        match params.filter.as_deref() {
            Some("active") => state.plans.list_active(page).await,
            Some("deleted") => state.plans.list_deleted(page).await,
            _ => state.plans.list(page).await,
        }
    }
    .map_err(error_response)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from(
        result.map(PlanDto::from),
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/plans",
    tag = "Plans",
    security(("bearer_auth" = [])),
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Plan created", body = ApiResponse<PlanDto>),
        (status = 403, description = "Super-admin access required"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_plan(
    State(state): State<PlanHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePlanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlanDto>>), (StatusCode, Json<ApiResponse<PlanDto>>)> {
    let dto = request.into_domain().map_err(error_response)?;
    let plan = state.plans.create(dto).await.map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PlanDto::from(plan))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/plans/{id}",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan details", body = ApiResponse<PlanDto>),
        (status = 403, description = "Super-admin access required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_plan(
    State(state): State<PlanHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PlanDto>>, (StatusCode, Json<ApiResponse<PlanDto>>)> {
    let plan = state
        .plans
        .get(PlanId::new(id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(PlanDto::from(plan))))
}

#[utoipa::path(
    put,
    path = "/api/v1/plans/{id}",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Plan ID")),
    request_body = UpdatePlanRequest,
    responses(
        (status = 200, description = "Plan updated", body = ApiResponse<PlanDto>),
        (status = 403, description = "Super-admin access required"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_plan(
    State(state): State<PlanHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdatePlanRequest>,
) -> Result<Json<ApiResponse<PlanDto>>, (StatusCode, Json<ApiResponse<PlanDto>>)> {
    let dto = request.into_domain().map_err(error_response)?;
    let plan = state
        .plans
        .update(PlanId::new(id), dto)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(PlanDto::from(plan))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/plans/{id}",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan soft-deleted"),
        (status = 403, description = "Super-admin access required"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Already deleted")
    )
)]
pub async fn delete_plan(
    State(state): State<PlanHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .plans
        .delete(PlanId::new(id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    post,
    path = "/api/v1/plans/{id}/restore",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan restored", body = ApiResponse<PlanDto>),
        (status = 403, description = "Super-admin access required"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Not deleted")
    )
)]
pub async fn restore_plan(
    State(state): State<PlanHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PlanDto>>, (StatusCode, Json<ApiResponse<PlanDto>>)> {
    let plan = state
        .plans
        .restore(PlanId::new(id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(PlanDto::from(plan))))
}
