//! Compact serialization: `base64url(header).base64url(payload).base64url(sig)`.

use crate::error::{Error, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

pub const ALG_HS256: &str = "HS256";
pub const TYP_JWT: &str = "JWT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl TokenHeader {
    #[must_use]
    pub fn hs256() -> Self {
        Self {
            alg: ALG_HS256.to_string(),
            typ: TYP_JWT.to_string(),
        }
    }
}

/// The three encoded segments of a compact token, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl Segments<'_> {
    /// Bytes covered by the signature.
    #[must_use]
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }
}

pub(crate) fn encode_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

pub(crate) fn decode_json<T: for<'de> Deserialize<'de>>(segment: &str, err: fn() -> Error) -> Result<T> {
    let bytes = Base64UrlUnpadded::decode_vec(segment).map_err(|_| err())?;
    serde_json::from_slice(&bytes).map_err(|_| err())
}

/// Split a token into exactly three non-empty segments.
///
/// # Errors
///
/// Returns [`Error::MalformedToken`] for any other shape.
pub fn split(token: &str) -> Result<Segments<'_>> {
    let mut parts = token.split('.');
    let header = parts.next().ok_or(Error::MalformedToken)?;
    let payload = parts.next().ok_or(Error::MalformedToken)?;
    let signature = parts.next().ok_or(Error::MalformedToken)?;
    if parts.next().is_some() {
        return Err(Error::MalformedToken);
    }
    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        return Err(Error::MalformedToken);
    }
    Ok(Segments {
        header,
        payload,
        signature,
    })
}

/// Decode the header and reject anything but `HS256`.
///
/// # Errors
///
/// Returns [`Error::MalformedToken`] if the header is not valid base64url JSON or
/// names another algorithm.
pub fn decode_header(segment: &str) -> Result<TokenHeader> {
    let header: TokenHeader = decode_json(segment, || Error::MalformedToken)?;
    if header.alg != ALG_HS256 {
        return Err(Error::MalformedToken);
    }
    Ok(header)
}
