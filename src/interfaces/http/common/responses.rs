//! Response envelopes and the error-to-status mapping

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::DomainError;
use crate::shared::types::{PaginatedResult, PaginationParams};
use crate::shared::validations::validate_pagination;

/// Standard API response wrapper
///
/// Every REST endpoint returns data in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload, `null` on failure
    pub data: Option<T>,
    /// Error description, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pagination query parameters for list requests
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-based). Default: 1
    pub page: Option<u32>,
    /// Items per page (1..=100). Default: 20
    pub limit: Option<u32>,
}

impl PaginationQuery {
    pub fn clamped(&self) -> PaginationParams {
        validate_pagination(self.page, self.limit)
    }
}

/// Paginated response
///
/// Carries one page of data plus page metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Total item count across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total page count
    pub total_pages: u32,
}

impl<T> From<PaginatedResult<T>> for PaginatedResponse<T> {
    fn from(result: PaginatedResult<T>) -> Self {
        Self {
            items: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// Map a domain error onto an HTTP status and the error envelope.
///
/// Auth failures collapse to 401 without detail; everything the caller can
/// fix about the request body is a 422.
pub fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidCredentials | DomainError::InvalidToken => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::AdmissionDenied(_)
        | DomainError::AlreadyInState(_)
        | DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error() {
        let body = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 42);
        assert!(body.get("error").is_none());
    }

    #[test]
    fn error_envelope_has_null_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());
        assert_eq!(body["error"], "boom");
    }

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        let cases = [
            (
                DomainError::NotFound {
                    entity: "User",
                    field: "id",
                    value: "9".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::InvalidToken, StatusCode::UNAUTHORIZED),
            (
                DomainError::Forbidden("cross-company access".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                DomainError::Conflict("Email already exists".into()),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::AdmissionDenied("user limit reached".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::AlreadyInState("User is already deleted".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::Validation("bad".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (err, expected) in cases {
            let (status, _body) = error_response::<()>(err);
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn pagination_query_clamps_raw_input() {
        let query = PaginationQuery {
            page: Some(0),
            limit: Some(1000),
        };
        let params = query.clamped();
        assert_eq!((params.page, params.limit), (1, 100));
    }
}
