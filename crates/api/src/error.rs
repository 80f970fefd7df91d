use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mangalib_core::catalog::CatalogError;
use mangalib_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and `sqlx` errors from the store.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mangalib_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::Core(CoreError::Catalog(err))
    }
}

impl AppError {
    /// The message a client sees for this error. Database failures are
    /// sanitized.
    pub fn public_message(&self) -> String {
        self.classify().2
    }

    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::NoActiveSession => {
                    (StatusCode::BAD_REQUEST, "NO_ACTIVE_SESSION", core.to_string())
                }
                CoreError::PaginationExhausted => {
                    (StatusCode::BAD_REQUEST, "PAGINATION_EXHAUSTED", core.to_string())
                }
                CoreError::NotInSearchResults(_) => {
                    (StatusCode::BAD_REQUEST, "NOT_IN_SEARCH_RESULTS", core.to_string())
                }
                CoreError::InvalidProgressUpdate(err) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_PROGRESS_UPDATE",
                    err.to_string(),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Catalog(err) => classify_catalog_error(err),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a catalog failure.
///
/// - An unknown id maps to 404.
/// - Everything else is an upstream failure and maps to 502.
fn classify_catalog_error(err: &CatalogError) -> (StatusCode, &'static str, String) {
    match err {
        CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        other => {
            tracing::warn!(error = %other, "Catalog request failed");
            (StatusCode::BAD_GATEWAY, "CATALOG_ERROR", other.to_string())
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (PostgreSQL `23505`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
