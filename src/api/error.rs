//! HTTP mapping for domain errors

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::NotOwner => StatusCode::FORBIDDEN,
            DomainError::DuplicateName
            | DomainError::DuplicateEmail
            | DomainError::AlreadyAssigned => StatusCode::CONFLICT,
            DomainError::SelfReservation => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Database(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(DomainError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(DomainError::NotOwner.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(DomainError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(DomainError::AlreadyAssigned.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            DomainError::Validation("title".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            DomainError::Database("locked".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
