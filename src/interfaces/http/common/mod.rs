//! Shared HTTP plumbing: response envelope and validated JSON extractor

pub mod validated_json;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use validated_json::ValidatedJson;

/// Standard response envelope.
///
/// Every REST endpoint wraps its payload:
/// success `{"success": true, "data": {...}}`,
/// failure `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload, `null` on error
    pub data: Option<T>,
    /// Error description, `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Map a domain error to its HTTP status and error envelope.
///
/// Repository-level database failures travel as
/// `Validation("Database error: …")` and surface as 500, everything else
/// keeps its taxonomy status.
pub fn domain_error_response(
    err: crate::domain::DomainError,
) -> (axum::http::StatusCode, axum::Json<ApiResponse<()>>) {
    use axum::http::StatusCode;
    use crate::domain::DomainError;

    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(msg) if msg.starts_with("Database error:") => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
    };
    (status, axum::Json(ApiResponse::error(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use axum::http::StatusCode;

    #[test]
    fn success_envelope_shape() {
        let resp = ApiResponse::success(5);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 5);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_envelope_shape() {
        let resp = ApiResponse::<()>::error("boom");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn error_taxonomy_maps_to_statuses() {
        let (status, _) = domain_error_response(DomainError::not_found("Car", "id", 1));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = domain_error_response(DomainError::Validation("bad category".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            domain_error_response(DomainError::Validation("Database error: locked".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = domain_error_response(DomainError::Conflict("dup".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = domain_error_response(DomainError::Forbidden("not yours".into()));
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
