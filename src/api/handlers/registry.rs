use crate::api::{error::ErrorBody, types::RegistryResponse};
use crate::session::SessionService;
use axum::extract::{Extension, Json};
use std::sync::Arc;
use tracing::instrument;

/// Live refresh sessions in this process. Admin only.
#[utoipa::path(
    get,
    path = "/v1/auth/registry",
    responses(
        (status = 200, description = "Registry size after pruning", body = RegistryResponse),
        (status = 401, description = "Missing, invalid or expired access token", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn registry(Extension(sessions): Extension<Arc<SessionService>>) -> Json<RegistryResponse> {
    Json(RegistryResponse {
        live_refresh_tokens: sessions.live_refresh_tokens(),
    })
}
