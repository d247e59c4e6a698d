use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::{access::DenyReason, auth::jwt::CredentialError, model::leave_request::LeaveStatus};

/// Application error taxonomy. Every operation reports its failure
/// synchronously through one of these; nothing is swallowed or retried.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing, expired or malformed bearer token.
    #[error("{0}")]
    Credential(#[from] CredentialError),

    /// Role, ownership or state violation for an authenticated caller.
    #[error("Access denied: {0}")]
    Denied(DenyReason),

    /// Field-level input violations, reported together.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: LeaveStatus, to: LeaveStatus },

    #[error("Leave Request Not Found")]
    NotFound,

    /// The persistence collaborator failed; surfaced generically, never
    /// retried here.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Credential failures are deliberately 400, not 401/403.
            AppError::Credential(_) => StatusCode::BAD_REQUEST,
            AppError::Denied(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
