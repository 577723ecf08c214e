use crate::api::{
    error::{ApiError, ErrorBody},
    identity::IdentityProvider,
    types::{LoginRequest, TokenResponse, required},
};
use crate::session::SessionService;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "New session", body = TokenResponse),
        (status = 400, description = "Missing username or password", body = ErrorBody),
        (status = 401, description = "Unknown credentials", body = ErrorBody)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    Extension(sessions): Extension<Arc<SessionService>>,
    Extension(identities): Extension<Arc<dyn IdentityProvider>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::validation("Invalid JSON body"))?;
    let username = required(request.username, "username")?;
    let password = required(request.password, "password")?;

    let Some(identity) = identities.authenticate(&username, &password).await? else {
        info!("login rejected");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    let grant = sessions.login(&identity.id, identity.role)?;
    let response = TokenResponse::from(grant).with_username(identity.username);
    Ok(([(CACHE_CONTROL, "no-store")], Json(response)))
}
