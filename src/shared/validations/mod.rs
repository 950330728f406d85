use crate::shared::types::PaginationParams;

/// Clamp raw pagination input to sane bounds: page >= 1, limit 1..=100.
pub fn validate_pagination(page: Option<u32>, limit: Option<u32>) -> PaginationParams {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    PaginationParams { page, limit }
}
