use super::store::{MemoryRefreshStore, Redemption, RefreshEntry, RefreshStore};
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::token::{Role, TokenConfig, TokenIssuer, TokenVerifier};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Tokens and identity returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    pub user_id: String,
    pub role: Role,
    pub session_id: String,
    pub access_token: String,
    pub access_token_expires_at: i64,
    pub refresh_token: String,
    pub refresh_token_expires_at: i64,
}

/// Identity carried by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub role: Role,
    pub session_id: String,
}

impl AuthContext {
    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

/// Login, rotation, logout and access-token authentication over one registry.
#[derive(Debug, Clone)]
pub struct SessionService {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    store: Arc<dyn RefreshStore>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    #[must_use]
    pub fn new(config: TokenConfig, store: Arc<dyn RefreshStore>, clock: Arc<dyn Clock>) -> Self {
        let config = Arc::new(config);
        Self {
            issuer: TokenIssuer::new(config.clone(), clock.clone()),
            verifier: TokenVerifier::new(config, clock.clone()),
            store,
            clock,
        }
    }

    /// Service backed by a [`MemoryRefreshStore`] and the system clock.
    #[must_use]
    pub fn in_memory(config: TokenConfig) -> Self {
        Self::new(config, Arc::new(MemoryRefreshStore::new()), Arc::new(SystemClock))
    }

    #[must_use]
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    #[must_use]
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Start a new session for an already authenticated user.
    ///
    /// # Errors
    ///
    /// Fails if the tokens cannot be minted or the refresh id cannot be registered.
    pub fn login(&self, user_id: &str, role: Role) -> Result<SessionGrant> {
        let session_id = Uuid::new_v4().to_string();
        let grant = self.grant(user_id, role, &session_id)?;
        info!(user_id, session_id = %grant.session_id, role = %role, "session started");
        Ok(grant)
    }

    /// Exchange a refresh token for a new pair in the same session.
    ///
    /// The presented token id is removed before anything new is minted, so it
    /// can never be redeemed again.
    ///
    /// # Errors
    ///
    /// Any verification failure, [`Error::RefreshAbsent`] for an unknown or
    /// already used id, and [`Error::RefreshMismatch`] when the registry entry
    /// belongs to another user or session. Callers should answer all of these
    /// with [`Error::public_message`].
    pub fn refresh(&self, refresh_token: &str) -> Result<SessionGrant> {
        let pruned = self.store.prune(self.clock.now_unix_seconds());
        if pruned > 0 {
            info!(pruned, "pruned expired refresh tokens");
        }

        let claims = self.verifier.verify_refresh(refresh_token).inspect_err(|err| {
            warn!(code = err.code(), "refresh token rejected");
        })?;

        let entry = match self.store.redeem(&claims.jti, &claims.sub, &claims.sid) {
            Redemption::Found(entry) => entry,
            Redemption::Absent => {
                warn!(
                    jti = %claims.jti,
                    session_id = %claims.sid,
                    "refresh token not registered, possible replay"
                );
                return Err(Error::RefreshAbsent);
            }
            Redemption::Mismatch => {
                warn!(
                    jti = %claims.jti,
                    user_id = %claims.sub,
                    session_id = %claims.sid,
                    "refresh token does not match its registry entry, entry removed"
                );
                return Err(Error::RefreshMismatch);
            }
        };

        let grant = self.grant(&entry.user_id, entry.role, &entry.session_id)?;
        info!(
            user_id = %grant.user_id,
            session_id = %grant.session_id,
            redeemed = %claims.jti,
            "refresh token rotated"
        );
        Ok(grant)
    }

    /// Verify an access token. No registry lookup happens here.
    ///
    /// # Errors
    ///
    /// Any verification failure.
    pub fn authenticate(&self, access_token: &str) -> Result<AuthContext> {
        let claims = self.verifier.verify_access(access_token)?;
        Ok(AuthContext {
            user_id: claims.sub,
            role: claims.role,
            session_id: claims.sid,
        })
    }

    /// End the session the refresh token belongs to. The presented token must
    /// still be live, so a token consumed by rotation cannot end the session
    /// its successor belongs to. Access tokens already issued stay valid until
    /// they expire.
    ///
    /// # Errors
    ///
    /// Any verification failure of the refresh token, plus the same
    /// [`Error::RefreshAbsent`] and [`Error::RefreshMismatch`] outcomes as
    /// [`SessionService::refresh`].
    pub fn logout(&self, refresh_token: &str) -> Result<usize> {
        self.store.prune(self.clock.now_unix_seconds());

        let claims = self.verifier.verify_refresh(refresh_token).inspect_err(|err| {
            warn!(code = err.code(), "logout with invalid refresh token");
        })?;

        match self.store.redeem(&claims.jti, &claims.sub, &claims.sid) {
            Redemption::Found(_) => {}
            Redemption::Absent => {
                warn!(
                    jti = %claims.jti,
                    session_id = %claims.sid,
                    "logout with unregistered refresh token, possible replay"
                );
                return Err(Error::RefreshAbsent);
            }
            Redemption::Mismatch => {
                warn!(
                    jti = %claims.jti,
                    user_id = %claims.sub,
                    session_id = %claims.sid,
                    "logout token does not match its registry entry, entry removed"
                );
                return Err(Error::RefreshMismatch);
            }
        }

        let revoked = 1 + self.store.revoke_session(&claims.sid);
        info!(user_id = %claims.sub, session_id = %claims.sid, revoked, "session ended");
        Ok(revoked)
    }

    /// Refresh token ids currently redeemable, after pruning.
    #[must_use]
    pub fn live_refresh_tokens(&self) -> usize {
        self.store.prune(self.clock.now_unix_seconds());
        self.store.len()
    }

    fn grant(&self, user_id: &str, role: Role, session_id: &str) -> Result<SessionGrant> {
        let access = self.issuer.issue_access_token(user_id, role, session_id)?;
        let refresh = self.issuer.issue_refresh_token(user_id, role, session_id)?;
        self.store.register(
            &refresh.token_id,
            RefreshEntry {
                user_id: user_id.to_string(),
                role,
                session_id: refresh.session_id.clone(),
                expires_at: refresh.expires_at,
            },
        )?;

        Ok(SessionGrant {
            user_id: user_id.to_string(),
            role,
            session_id: refresh.session_id,
            access_token: access.token,
            access_token_expires_at: access.expires_at,
            refresh_token: refresh.token,
            refresh_token_expires_at: refresh.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn service(now: i64) -> (SessionService, Arc<ManualClock>, Arc<MemoryRefreshStore>) {
        let clock = Arc::new(ManualClock::new(now));
        let store = Arc::new(MemoryRefreshStore::new());
        let service = SessionService::new(TokenConfig::development(), store.clone(), clock.clone());
        (service, clock, store)
    }

    #[test]
    fn login_registers_refresh_token() -> anyhow::Result<()> {
        let (service, _, store) = service(1_000);
        let grant = service.login("u1", Role::Manager)?;
        assert_eq!(store.len(), 1);
        assert_eq!(grant.access_token_expires_at, 1_900);
        assert_eq!(grant.refresh_token_expires_at, 1_000 + 604_800);

        let context = service.authenticate(&grant.access_token)?;
        assert_eq!(context.user_id, "u1");
        assert_eq!(context.role, Role::Manager);
        assert_eq!(context.session_id, grant.session_id);
        Ok(())
    }

    #[test]
    fn logins_get_distinct_sessions() -> anyhow::Result<()> {
        let (service, _, _) = service(1_000);
        let a = service.login("u1", Role::Agent)?;
        let b = service.login("u1", Role::Agent)?;
        assert_ne!(a.session_id, b.session_id);
        Ok(())
    }

    #[test]
    fn refresh_keeps_session_and_consumes_old_token() -> anyhow::Result<()> {
        let (service, clock, store) = service(1_000);
        let first = service.login("u1", Role::Agent)?;
        clock.advance(10);

        let second = service.refresh(&first.refresh_token)?;
        assert_eq!(second.session_id, first.session_id);
        assert_ne!(second.refresh_token, first.refresh_token);
        assert_eq!(store.len(), 1);

        assert!(matches!(service.refresh(&first.refresh_token), Err(Error::RefreshAbsent)));
        assert!(service.refresh(&second.refresh_token).is_ok());
        Ok(())
    }

    #[test]
    fn refresh_rejects_access_token() -> anyhow::Result<()> {
        let (service, _, _) = service(1_000);
        let grant = service.login("u1", Role::Agent)?;
        let err = service.refresh(&grant.access_token).err();
        assert!(matches!(err, Some(Error::InvalidSignature)));
        Ok(())
    }

    #[test]
    fn authenticate_rejects_refresh_token() -> anyhow::Result<()> {
        let (service, _, _) = service(1_000);
        let grant = service.login("u1", Role::Agent)?;
        assert!(service.authenticate(&grant.refresh_token).is_err());
        Ok(())
    }

    #[test]
    fn logout_revokes_session() -> anyhow::Result<()> {
        let (service, _, store) = service(1_000);
        let grant = service.login("u1", Role::Agent)?;
        let other = service.login("u2", Role::Agent)?;

        assert_eq!(service.logout(&grant.refresh_token)?, 1);
        assert_eq!(store.len(), 1);
        assert!(matches!(service.refresh(&grant.refresh_token), Err(Error::RefreshAbsent)));
        assert!(service.refresh(&other.refresh_token).is_ok());
        // access tokens are not revocable
        assert!(service.authenticate(&grant.access_token).is_ok());
        Ok(())
    }

    #[test]
    fn logout_with_rotated_token_keeps_session() -> anyhow::Result<()> {
        let (service, _, store) = service(1_000);
        let first = service.login("u1", Role::Agent)?;
        let second = service.refresh(&first.refresh_token)?;

        assert!(matches!(service.logout(&first.refresh_token), Err(Error::RefreshAbsent)));
        assert_eq!(store.len(), 1);
        assert!(service.refresh(&second.refresh_token).is_ok());
        Ok(())
    }

    #[test]
    fn logout_twice_fails_the_second_time() -> anyhow::Result<()> {
        let (service, _, _) = service(1_000);
        let grant = service.login("u1", Role::Agent)?;
        assert_eq!(service.logout(&grant.refresh_token)?, 1);
        assert!(matches!(service.logout(&grant.refresh_token), Err(Error::RefreshAbsent)));
        Ok(())
    }

    #[test]
    fn live_refresh_tokens_prunes_expired() -> anyhow::Result<()> {
        let (service, clock, _) = service(1_000);
        service.login("u1", Role::Agent)?;
        assert_eq!(service.live_refresh_tokens(), 1);
        clock.advance(604_800);
        assert_eq!(service.live_refresh_tokens(), 0);
        Ok(())
    }

    #[test]
    fn has_any_role() {
        let context = AuthContext {
            user_id: "u".to_string(),
            role: Role::Manager,
            session_id: "s".to_string(),
        };
        assert!(context.has_any_role(&[Role::Admin, Role::Manager]));
        assert!(!context.has_any_role(&[Role::Admin]));
        assert!(!context.has_any_role(&[]));
    }
}
