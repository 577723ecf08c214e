use crate::api::{
    error::{ApiError, ErrorBody},
    types::{RefreshRequest, TokenResponse, required},
};
use crate::session::SessionService;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Rotated token pair, same session", body = TokenResponse),
        (status = 400, description = "Missing refresh token", body = ErrorBody),
        (status = 401, description = "Invalid, expired or already used refresh token", body = ErrorBody)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn refresh(
    Extension(sessions): Extension<Arc<SessionService>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::validation("Invalid JSON body"))?;
    let refresh_token = required(request.refresh_token, "refreshToken")?;

    let grant = sessions.refresh(&refresh_token)?;
    Ok(([(CACHE_CONTROL, "no-store")], Json(TokenResponse::from(grant))))
}
