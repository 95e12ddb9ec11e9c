use axum::{Json, http::StatusCode};
use db::error::DomainError;
use serde::Serialize;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// Every endpoint returns the same envelope:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `success` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
///
/// ## Example (error):
/// ```json
/// {
///   "success": false,
///   "data": {},
///   "message": "Committee member not found"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    ///
    /// # Requires
    /// - `T` must implement `Default`, since error responses do not include useful data.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Maps a [`DomainError`] onto the status code and envelope every handler uses.
///
/// Storage failures are logged here with their detail and reported to the
/// client as a bare "Storage unavailable" so database internals never leak
/// into responses.
pub fn domain_error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    let (status, message) = match &err {
        DomainError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::ConstraintViolation(_) => (StatusCode::CONFLICT, err.to_string()),
        DomainError::ValidationError(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        DomainError::StorageUnavailable(db_err) => {
            tracing::error!(error = %db_err, "Database operation failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Storage unavailable".to_string(),
            )
        }
        DomainError::Io(io_err) => {
            tracing::error!(error = %io_err, "Photo storage operation failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Storage unavailable".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(message)))
}
