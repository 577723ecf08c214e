use axum::{
    http::{StatusCode, header::CACHE_CONTROL},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

pub const AUTH_INVALID_CREDENTIALS: &str = "AUTH_INVALID_CREDENTIALS";
pub const AUTH_FORBIDDEN: &str = "AUTH_FORBIDDEN";
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// HTTP-facing error, rendered as `{code, message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: AUTH_INVALID_CREDENTIALS,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            code: AUTH_FORBIDDEN,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: VALIDATION_FAILED,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: INTERNAL_ERROR,
            message: "Unexpected server error".to_string(),
        }
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        if err.is_credential_error() {
            Self::unauthorized(err.public_message())
        } else {
            error!(code = err.code(), "token subsystem failure: {err}");
            Self::internal()
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!("request failed: {err:#}");
        Self::internal()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code.to_string(),
            message: self.message,
        };
        (self.status, [(CACHE_CONTROL, "no-store")], Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn credential_errors_map_to_one_unauthorized() {
        let expired = ApiError::from(Error::Expired);
        let replay = ApiError::from(Error::RefreshAbsent);
        assert_eq!(expired, replay);
        assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
        assert_eq!(expired.code, AUTH_INVALID_CREDENTIALS);
        assert_eq!(expired.message, "Invalid or expired credential");
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = ApiError::from(Error::DuplicateTokenId("t".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, INTERNAL_ERROR);
        assert_eq!(err.message, "Unexpected server error");
    }
}
