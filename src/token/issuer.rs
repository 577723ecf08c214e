use super::claims::{Claims, Role, TokenType};
use super::codec::{self, TokenHeader};
use super::config::TokenConfig;
use super::signer;
use crate::clock::Clock;
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub token_id: String,
    pub session_id: String,
    pub expires_at: i64,
}

/// Mints signed tokens. Holds no state beyond configuration; recording refresh
/// token ids is the caller's job.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: Arc<TokenConfig>,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(config: Arc<TokenConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// # Errors
    ///
    /// [`Error::InvalidPayload`] for an empty user or session id, or an encoding
    /// failure.
    pub fn issue_access_token(&self, user_id: &str, role: Role, session_id: &str) -> Result<AccessToken> {
        let claims = self.claims(
            user_id,
            role,
            session_id,
            TokenType::Access,
            self.config.access_ttl_seconds(),
        )?;
        let token = encode(&claims, self.config.access_secret())?;
        debug!(user_id, session_id, jti = %claims.jti, "issued access token");
        Ok(AccessToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// # Errors
    ///
    /// [`Error::InvalidPayload`] for an empty user or session id, or an encoding
    /// failure.
    pub fn issue_refresh_token(&self, user_id: &str, role: Role, session_id: &str) -> Result<RefreshToken> {
        let claims = self.claims(
            user_id,
            role,
            session_id,
            TokenType::Refresh,
            self.config.refresh_ttl_seconds(),
        )?;
        let token = encode(&claims, self.config.refresh_secret())?;
        debug!(user_id, session_id, jti = %claims.jti, "issued refresh token");
        Ok(RefreshToken {
            token,
            token_id: claims.jti,
            session_id: claims.sid,
            expires_at: claims.exp,
        })
    }

    fn claims(
        &self,
        user_id: &str,
        role: Role,
        session_id: &str,
        typ: TokenType,
        ttl_seconds: i64,
    ) -> Result<Claims> {
        if user_id.is_empty() || session_id.is_empty() {
            return Err(Error::InvalidPayload);
        }
        let iat = self.clock.now_unix_seconds();
        Ok(Claims {
            sub: user_id.to_string(),
            role,
            sid: session_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            typ,
            iat,
            exp: iat.saturating_add(ttl_seconds.max(1)),
        })
    }
}

/// Serialize and sign `claims` into `header.payload.signature`.
///
/// # Errors
///
/// Returns an error if the header or claims cannot be encoded or the key is rejected.
pub fn encode(claims: &Claims, secret: &[u8]) -> Result<String> {
    let header = codec::encode_json(&TokenHeader::hs256())?;
    let payload = codec::encode_json(claims)?;
    let signing_input = format!("{header}.{payload}");
    let signature = signer::sign(secret, &signing_input)?;
    Ok(format!("{signing_input}.{signature}"))
}
