//! `CoreError` to HTTP response mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use dyndns_relay_core::CoreError;

/// Wrapper mapping pipeline errors onto the service's status taxonomy:
/// 400 malformed input, 403 domain mismatch, 404 unknown token, 500 for
/// every dependent failure. The error text is the plain-text body.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::DomainMismatch { .. } => StatusCode::FORBIDDEN,
            CoreError::HostNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.is_expected() {
            tracing::warn!("update rejected: {}", self.0);
        } else {
            tracing::error!("update failed: {}", self.0);
        }
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(format!("{}\n", self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_taxonomy() {
        assert_eq!(
            ApiError(CoreError::BadRequest("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(CoreError::DomainMismatch {
                asserted: "a".into(),
                configured: "b".into(),
            })
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError(CoreError::HostNotFound("t".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(CoreError::Template("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(CoreError::ProbeFailed("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
