//! Shared HTTP building blocks

mod responses;
mod validated_json;

pub use responses::{error_response, ApiResponse, PaginatedResponse, PaginationQuery};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
