//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value.
//! On validation failure it returns an automatic 422 response with
//! structured field-level error details.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

/// An extractor that deserializes JSON and validates it.
///
/// # Usage
///
/// ```ignore
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreatePlanRequest {
///     #[validate(length(min = 2, max = 255))]
///     name: String,
///     #[validate(length(min = 1))]
///     features: Vec<String>,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<CreatePlanRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Why a `ValidatedJson` extraction was refused.
pub enum ValidatedJsonRejection {
    /// The body never deserialized; a 400.
    Json(JsonRejection),
    /// The body deserialized but broke a `validator` rule; a 422.
    Validation(validator::ValidationErrors),
}

/// One line per failed rule, `field: message` shaped.
fn describe_field_errors(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut lines = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            let detail = match &err.message {
                Some(message) => message.to_string(),
                None => format!("{:?}", err.code),
            };
            lines.push(format!("{}: {}", field, detail));
        }
    }
    lines
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", rejection),
            ),
            Self::Validation(errors) => {
                let lines = describe_field_errors(&errors);
                let message = if lines.is_empty() {
                    "Validation failed".to_string()
                } else {
                    lines.join("; ")
                };
                (StatusCode::UNPROCESSABLE_ENTITY, message)
            }
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::Validation)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────
