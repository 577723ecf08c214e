//! HTTP edge for the token subsystem.
//!
//! [`router`] returns an axum `Router` a host service can mount or serve on its
//! own. It carries its state in `Extension` layers: the shared
//! [`SessionService`] and the host's [`IdentityProvider`].

use crate::session::SessionService;
use crate::token::Role;
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{Span, info_span};
use ulid::Ulid;

pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod types;
mod openapi;

pub use error::ApiError;
pub use identity::{Identity, IdentityProvider};
pub use openapi::openapi;

const ADMIN_ONLY: &[Role] = &[Role::Admin];

#[must_use]
pub fn router(sessions: Arc<SessionService>, identities: Arc<dyn IdentityProvider>) -> Router {
    let public = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/v1/auth/login", post(handlers::login::login))
        .route("/v1/auth/refresh", post(handlers::refresh::refresh))
        .route("/v1/auth/logout", post(handlers::logout::logout));

    let authenticated = Router::new()
        .route("/v1/auth/session", get(handlers::session::session))
        .route_layer(from_fn(middleware::require_auth));

    // route layers run outermost-last: authenticate first, then check the role
    let admin = Router::new()
        .route("/v1/auth/registry", get(handlers::registry::registry))
        .route_layer(from_fn_with_state(ADMIN_ONLY, middleware::require_roles))
        .route_layer(from_fn(middleware::require_auth));

    public.merge(authenticated).merge(admin).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(Extension(sessions))
            .layer(Extension(identities)),
    )
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
