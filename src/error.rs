//! Error taxonomy for token verification and refresh redemption.
//!
//! Every credential failure is distinguishable here (for logs and telemetry) but
//! shares a single [`Error::public_message`], so callers never reveal which
//! check rejected a token.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

const CREDENTIAL_MESSAGE: &str = "Invalid or expired credential";
const INTERNAL_MESSAGE: &str = "Unexpected server error";

#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("malformed token")]
    MalformedToken,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("invalid token type")]
    InvalidType,

    #[error("token expired")]
    Expired,

    #[error("invalid token payload")]
    InvalidPayload,

    // ─────────────────────────────────────────────────────────────────────────────
    // Redemption
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("refresh token is not registered")]
    RefreshAbsent,

    #[error("refresh token does not match its session")]
    RefreshMismatch,

    // ─────────────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("duplicate refresh token id: {0}")]
    DuplicateTokenId(String),

    #[error("invalid signing key")]
    InvalidKey,

    #[error("failed to encode token: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    /// Stable identifier for logs, never sent to clients.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::InvalidType => "INVALID_TYPE",
            Self::Expired => "EXPIRED",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::RefreshAbsent => "REFRESH_ABSENT",
            Self::RefreshMismatch => "REFRESH_MISMATCH",
            Self::DuplicateTokenId(_) => "DUPLICATE_TOKEN_ID",
            Self::InvalidKey => "INVALID_KEY",
            Self::Encode(_) => "ENCODE_FAILED",
        }
    }

    /// True when the failure is caused by the presented credential rather than
    /// by this process. Callers map these to `401 Unauthorized`.
    #[must_use]
    pub const fn is_credential_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedToken
                | Self::InvalidSignature
                | Self::InvalidType
                | Self::Expired
                | Self::InvalidPayload
                | Self::RefreshAbsent
                | Self::RefreshMismatch
        )
    }

    /// Client-facing message. Identical for every credential error.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        if self.is_credential_error() {
            CREDENTIAL_MESSAGE
        } else {
            INTERNAL_MESSAGE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential_errors() -> Vec<Error> {
        vec![
            Error::MalformedToken,
            Error::InvalidSignature,
            Error::InvalidType,
            Error::Expired,
            Error::InvalidPayload,
            Error::RefreshAbsent,
            Error::RefreshMismatch,
        ]
    }

    #[test]
    fn credential_errors_share_public_message() {
        for err in credential_errors() {
            assert!(err.is_credential_error(), "{} should be a credential error", err.code());
            assert_eq!(err.public_message(), "Invalid or expired credential");
        }
    }

    #[test]
    fn credential_error_codes_are_distinct() {
        let mut codes: Vec<&str> = credential_errors().iter().map(Error::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 7);
    }

    #[test]
    fn internal_errors_are_not_credential_errors() {
        let err = Error::DuplicateTokenId("abc".to_string());
        assert!(!err.is_credential_error());
        assert_eq!(err.public_message(), "Unexpected server error");
        assert_eq!(err.to_string(), "duplicate refresh token id: abc");
        assert!(!Error::InvalidKey.is_credential_error());
    }
}
