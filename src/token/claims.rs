use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Agent,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Admin, Self::Manager, Self::Agent];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}

/// Token purpose; decides which secret signs it and where it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "access" => Ok(Self::Access),
            "refresh" => Ok(Self::Refresh),
            other => Err(format!("unknown token type: {other}")),
        }
    }
}

/// Fully validated claims. Only produced by successful verification or by the issuer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub sid: String,
    pub jti: String,
    pub typ: TokenType,
    pub iat: i64,
    pub exp: i64,
}

/// Claims as they arrive on the wire, before any field is trusted.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawClaims {
    sub: Option<String>,
    role: Option<String>,
    sid: Option<String>,
    jti: Option<String>,
    typ: Option<String>,
    iat: Option<i64>,
    exp: Option<i64>,
}

fn non_empty(value: Option<String>) -> Result<String> {
    value.filter(|v| !v.is_empty()).ok_or(Error::InvalidPayload)
}

impl RawClaims {
    /// Checks type, then expiry, then completeness.
    pub(crate) fn into_claims(self, expected: TokenType, now_unix_seconds: i64) -> Result<Claims> {
        if self.typ.as_deref() != Some(expected.as_str()) {
            return Err(Error::InvalidType);
        }

        let exp = self.exp.ok_or(Error::InvalidPayload)?;
        if exp <= now_unix_seconds {
            return Err(Error::Expired);
        }

        let iat = self.iat.ok_or(Error::InvalidPayload)?;
        if iat >= exp {
            return Err(Error::InvalidPayload);
        }

        let role = self
            .role
            .as_deref()
            .and_then(|r| r.parse::<Role>().ok())
            .ok_or(Error::InvalidPayload)?;

        Ok(Claims {
            sub: non_empty(self.sub)?,
            role,
            sid: non_empty(self.sid)?,
            jti: non_empty(self.jti)?,
            typ: expected,
            iat,
            exp,
        })
    }
}
