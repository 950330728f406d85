use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    /// Login failure. Deliberately carries no detail: wrong password,
    /// unknown email and deactivated account are indistinguishable to the
    /// caller so the API cannot be used to enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A bearer token that does not resolve to a live session.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Plan user-limit reached for the target company.
    #[error("Admission denied: {0}")]
    AdmissionDenied(String),

    /// Delete-when-already-deleted or restore-when-not-deleted.
    #[error("{0}")]
    AlreadyInState(String),
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

// ── Tests ──────────────────────────────────────────────────────
