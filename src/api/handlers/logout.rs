use crate::api::{
    error::{ApiError, ErrorBody},
    types::{RefreshRequest, required},
};
use crate::session::SessionService;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    request_body = RefreshRequest,
    responses(
        (status = 204, description = "Session ended"),
        (status = 400, description = "Missing refresh token", body = ErrorBody),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorBody)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn logout(
    Extension(sessions): Extension<Arc<SessionService>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::validation("Invalid JSON body"))?;
    let refresh_token = required(request.refresh_token, "refreshToken")?;

    sessions.logout(&refresh_token)?;
    Ok(StatusCode::NO_CONTENT)
}
