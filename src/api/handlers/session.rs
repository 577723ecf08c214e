use crate::api::{error::ErrorBody, types::SessionResponse};
use crate::session::AuthContext;
use axum::{
    extract::{Extension, Json},
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Identity of the access token", body = SessionResponse),
        (status = 401, description = "Missing, invalid or expired access token", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn session(Extension(context): Extension<AuthContext>) -> impl IntoResponse {
    ([(CACHE_CONTROL, "no-store")], Json(SessionResponse::from(context)))
}
