use super::error::ApiError;
use crate::session::{AuthContext, SessionService};
use crate::token::Role;
use axum::{
    extract::{Extension, Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

pub const MISSING_AUTHORIZATION: &str = "Missing authorization header";
pub const INVALID_AUTHORIZATION: &str = "Invalid authorization header";
pub const INSUFFICIENT_ROLE: &str = "Insufficient role for this action";

#[derive(Debug, PartialEq, Eq)]
pub enum BearerError {
    Missing,
    Invalid,
}

/// Read the token from `Authorization: Bearer <token>`.
///
/// # Errors
///
/// [`BearerError::Missing`] without the header, [`BearerError::Invalid`] for any
/// other scheme, a non-ASCII value or an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, BearerError> {
    let value = headers.get(AUTHORIZATION).ok_or(BearerError::Missing)?;
    let value = value.to_str().map_err(|_| BearerError::Invalid)?.trim();
    if value.is_empty() {
        return Err(BearerError::Missing);
    }
    let (scheme, token) = value.split_once(' ').ok_or(BearerError::Invalid)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::Invalid);
    }
    let token = token.trim();
    if token.is_empty() {
        Err(BearerError::Invalid)
    } else {
        Ok(token.to_string())
    }
}

/// Verify the access token and attach the [`AuthContext`] to the request.
pub async fn require_auth(
    Extension(sessions): Extension<Arc<SessionService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_bearer_token(request.headers()) {
        Ok(token) => token,
        Err(BearerError::Missing) => return ApiError::unauthorized(MISSING_AUTHORIZATION).into_response(),
        Err(BearerError::Invalid) => return ApiError::unauthorized(INVALID_AUTHORIZATION).into_response(),
    };

    match sessions.authenticate(&token) {
        Ok(context) => {
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// Allow the request only for the given roles. Must run after [`require_auth`].
pub async fn require_roles(State(roles): State<&'static [Role]>, request: Request, next: Next) -> Response {
    let allowed = request
        .extensions()
        .get::<AuthContext>()
        .is_some_and(|context| context.has_any_role(roles));
    if allowed {
        next.run(request).await
    } else {
        debug!("role check failed");
        ApiError::forbidden(INSUFFICIENT_ROLE).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc")), Ok("abc".to_string()));
        assert_eq!(extract_bearer_token(&headers("bearer abc")), Ok("abc".to_string()));
        assert_eq!(extract_bearer_token(&headers("BEARER  abc ")), Ok("abc".to_string()));
    }

    #[test]
    fn missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), Err(BearerError::Missing));
        assert_eq!(extract_bearer_token(&headers("  ")), Err(BearerError::Missing));
    }

    #[test]
    fn invalid_scheme_or_empty_token() {
        assert_eq!(extract_bearer_token(&headers("Basic abc")), Err(BearerError::Invalid));
        assert_eq!(extract_bearer_token(&headers("Bearer")), Err(BearerError::Invalid));
        assert_eq!(extract_bearer_token(&headers("abc")), Err(BearerError::Invalid));
    }
}
