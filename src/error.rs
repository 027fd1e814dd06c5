use axum::http::StatusCode;
use axum::response::IntoResponse;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::{error, warn};

#[derive(Debug, ThisError)]
pub enum MindwellError {
    #[error("missing required fields")]
    MissingFields,

    #[error("account already exists")]
    DuplicateAccount,

    #[error("store unavailable: {0}")]
    StoreUnavailable(SqlxError),

    #[error("database error: {0}")]
    Database(SqlxError),

    #[error("password hash error: {0}")]
    Hash(String),

    #[error("blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Classify driver errors at conversion time so callers can lean on `?`.
/// A unique-constraint violation is the store winning the pre-check/insert
/// race and must surface as a duplicate, never as an internal fault.
impl From<SqlxError> for MindwellError {
    fn from(e: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            return MindwellError::DuplicateAccount;
        }
        match e {
            SqlxError::Io(_)
            | SqlxError::Tls(_)
            | SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::WorkerCrashed => MindwellError::StoreUnavailable(e),
            other => MindwellError::Database(other),
        }
    }
}

/// Whether the bootstrap retry loop should keep attempting after this error.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for MindwellError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            MindwellError::StoreUnavailable(_) | MindwellError::Database(_)
        )
    }
}

impl IntoResponse for MindwellError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            MindwellError::MissingFields => (StatusCode::BAD_REQUEST, "Missing required fields"),
            MindwellError::DuplicateAccount => (StatusCode::CONFLICT, "User already exists"),
            MindwellError::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Database connection error. Please try again later.",
            ),
            MindwellError::Database(_) | MindwellError::Hash(_) | MindwellError::TaskJoin(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        // Raw cause stays in the log only; response bodies are terse and
        // never carry credentials or internal identifiers.
        if status.is_server_error() {
            error!(error = %self, "registration request failed");
        } else {
            warn!(error = %self, "registration request rejected");
        }

        (status, body).into_response()
    }
}
