use super::claims::{Claims, RawClaims, TokenType};
use super::codec;
use super::config::TokenConfig;
use super::signer;
use crate::clock::Clock;
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Verify a compact token and return its claims.
///
/// Checks run in a fixed order and the first failure wins: segment structure and
/// header, signature, type, expiry, payload completeness. Nothing from the payload
/// is read before the signature is confirmed.
///
/// # Errors
///
/// - [`Error::MalformedToken`] if the token is not three segments or the header is not HS256,
/// - [`Error::InvalidSignature`] if the MAC does not match `secret`,
/// - [`Error::InvalidPayload`] if the payload is not base64url JSON or misses a required claim,
/// - [`Error::InvalidType`] if `typ` differs from `expected`,
/// - [`Error::Expired`] if `exp <= now_unix_seconds`.
pub fn verify(token: &str, secret: &[u8], expected: TokenType, now_unix_seconds: i64) -> Result<Claims> {
    let segments = codec::split(token)?;
    codec::decode_header(segments.header)?;

    if !signer::verify(secret, &segments.signing_input(), segments.signature) {
        return Err(Error::InvalidSignature);
    }

    let raw: RawClaims = codec::decode_json(segments.payload, || Error::InvalidPayload)?;
    raw.into_claims(expected, now_unix_seconds)
}

/// Verifies tokens against the configured per-type secrets.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    config: Arc<TokenConfig>,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(config: Arc<TokenConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// # Errors
    ///
    /// See [`verify`].
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let secret = match expected {
            TokenType::Access => self.config.access_secret(),
            TokenType::Refresh => self.config.refresh_secret(),
        };
        verify(token, secret, expected, self.clock.now_unix_seconds()).inspect_err(|err| {
            debug!(code = err.code(), typ = %expected, "token rejected");
        })
    }

    /// # Errors
    ///
    /// See [`verify`].
    pub fn verify_access(&self, token: &str) -> Result<Claims> {
        self.verify(token, TokenType::Access)
    }

    /// # Errors
    ///
    /// See [`verify`].
    pub fn verify_refresh(&self, token: &str) -> Result<Claims> {
        self.verify(token, TokenType::Refresh)
    }
}
