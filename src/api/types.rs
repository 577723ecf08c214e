use super::error::ApiError;
use crate::session::{AuthContext, SessionGrant};
use crate::token::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of `/v1/auth/refresh` and `/v1/auth/logout`.
#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: String,
    /// Present on login only; the refresh registry does not know usernames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub role: Role,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub access_token_expires_at: i64,
    pub refresh_token: String,
    pub refresh_token_expires_at: i64,
    pub session_id: String,
    pub user: UserSummary,
}

impl From<SessionGrant> for TokenResponse {
    fn from(grant: SessionGrant) -> Self {
        Self {
            access_token: grant.access_token,
            access_token_expires_at: grant.access_token_expires_at,
            refresh_token: grant.refresh_token,
            refresh_token_expires_at: grant.refresh_token_expires_at,
            session_id: grant.session_id,
            user: UserSummary {
                id: grant.user_id,
                username: None,
                role: grant.role,
            },
        }
    }
}

impl TokenResponse {
    #[must_use]
    pub fn with_username(mut self, username: String) -> Self {
        self.user.username = Some(username);
        self
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub role: Role,
    pub session_id: String,
}

impl From<AuthContext> for SessionResponse {
    fn from(context: AuthContext) -> Self {
        Self {
            user_id: context.user_id,
            role: context.role,
            session_id: context.session_id,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryResponse {
    pub live_refresh_tokens: usize,
}

/// Trimmed, non-empty string field or a validation error naming it.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::validation(format!("Field '{field}' is required")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required(Some("  bob ".to_string()), "username").ok(), Some("bob".to_string()));
        let err = required(Some("   ".to_string()), "username").err();
        assert_eq!(
            err.map(|e| e.message),
            Some("Field 'username' is required".to_string())
        );
        assert!(required(None, "password").is_err());
    }

    #[test]
    fn refresh_request_reads_camel_case() -> anyhow::Result<()> {
        let request: RefreshRequest = serde_json::from_str(r#"{"refreshToken":"abc"}"#)?;
        assert_eq!(request.refresh_token.as_deref(), Some("abc"));
        let empty: RefreshRequest = serde_json::from_str("{}")?;
        assert!(empty.refresh_token.is_none());
        Ok(())
    }
}
