//! # CBSP Auth (Access & Refresh Tokens)
//!
//! `cbsp-auth` issues and verifies the bearer credentials used by the CBSP API:
//! short-lived **access tokens** and longer-lived, single-use, rotating
//! **refresh tokens**. It also owns the refresh-session registry that makes
//! rotation and revocation enforceable.
//!
//! ## Token Format
//!
//! Tokens are compact JWS strings `header.payload.signature`, every segment
//! base64url encoded without padding. The signature is HMAC-SHA256 over
//! `header.payload`. Access and refresh tokens are signed with **distinct
//! secrets** and carry a `typ` claim, so a refresh token never verifies as an
//! access token (and vice versa) even if one secret class leaks.
//!
//! ## Rotation
//!
//! Login mints a fresh session id and an access/refresh pair, and registers the
//! refresh token id. Refresh verifies the presented token, **removes** its id
//! from the registry (one-time use), then mints a new pair under the same
//! session id. A refresh token that was already redeemed is indistinguishable
//! from one that was never issued.
//!
//! Access tokens are stateless: they are not looked up in the registry and stay
//! valid until they expire.
//!
//! ## Scaling
//!
//! The bundled [`session::MemoryRefreshStore`] lives in process memory. All
//! refresh sessions are lost on restart and instances do not share state; a
//! multi-instance deployment needs a durable [`session::RefreshStore`].

pub mod api;
pub mod cli;
pub mod clock;
pub mod error;
pub mod session;
pub mod token;

pub use error::{Error, Result};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
