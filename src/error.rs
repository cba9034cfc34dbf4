use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::RecommendationOutcome;

/// Application-level errors
///
/// Every variant is scoped to a single request cycle; none of them is fatal to the process.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A required input was empty or malformed; the caller must resupply it
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The search provider failed or timed out; no state was mutated
    #[error("Search provider error: {0}")]
    Provider(String),

    /// A persisted profile exists but does not match the record schema
    #[error("Stored profile for '{name}' is corrupt: {reason}")]
    CorruptProfile { name: String, reason: String },

    /// A recommendation was computed but the updated profile could not be saved.
    ///
    /// The outcome is real but not durable: retrying the same request may surface the
    /// same item again.
    #[error("Profile could not be saved: {reason}")]
    Persistence {
        reason: String,
        outcome: Box<RecommendationOutcome>,
    },

    /// Profile storage could not be read
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Provider(_) => "provider",
            AppError::CorruptProfile { .. } => "corrupt_profile",
            AppError::Persistence { .. } => "persistence",
            AppError::Storage(_) => "storage",
            AppError::Database(_) => "database",
            AppError::Cache(_) => "cache",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::CorruptProfile { .. }
            | AppError::Persistence { .. }
            | AppError::Storage(_)
            | AppError::Database(_)
            | AppError::Cache(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Provider(format!("request timed out: {}", err))
        } else {
            AppError::Provider(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let mut body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });

        // The caller must learn that the recommendation exists but was not recorded
        if let AppError::Persistence { outcome, .. } = &self {
            body["recommendation"] = json!(outcome);
            body["durable"] = json!(false);
        }

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
