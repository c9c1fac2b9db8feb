use thiserror::Error;

/// Crate-wide error taxonomy.
///
/// Store and repository operations surface these via [`SextonResult`];
/// HTTP handlers convert them into `server::api_error::ApiError`.
#[derive(Debug, Clone, Error)]
pub enum SextonError {
    /// The underlying store failed (connection, query, or driver error).
    #[error("store error: {0}")]
    Store(String),

    /// A requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation conflicts with stored state (e.g. duplicate name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller-supplied data failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be loaded or validated.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

pub type SextonResult<T> = Result<T, SextonError>;
