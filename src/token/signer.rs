//! HMAC-SHA256 signing over the token signing input.

use crate::error::{Error, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign `input` and return the base64url (unpadded) MAC.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if the MAC cannot be keyed.
pub fn sign(secret: &[u8], input: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| Error::InvalidKey)?;
    mac.update(input.as_bytes());
    Ok(Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes()))
}

/// Check `signature` against the MAC of `input`.
///
/// The comparison runs in constant time over the decoded bytes. Undecodable
/// signatures and signatures of the wrong length fail without panicking.
#[must_use]
pub fn verify(secret: &[u8], input: &str, signature: &str) -> bool {
    let Ok(expected) = Base64UrlUnpadded::decode_vec(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(input.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_is_deterministic() -> anyhow::Result<()> {
        let a = sign(b"secret", "header.payload")?;
        let b = sign(b"secret", "header.payload")?;
        assert_eq!(a, b);
        // 32 byte MAC, unpadded base64url
        assert_eq!(a.len(), 43);
        assert!(!a.contains('=') && !a.contains('+') && !a.contains('/'));
        Ok(())
    }

    #[test]
    fn sign_matches_rfc4231_case_2() -> anyhow::Result<()> {
        // key "Jefe", data "what do ya want for nothing?"
        let sig = sign(b"Jefe", "what do ya want for nothing?")?;
        let bytes = Base64UrlUnpadded::decode_vec(&sig).map_err(|e| anyhow::anyhow!("{e}"))?;
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(
            hex,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
        Ok(())
    }

    #[test]
    fn verify_accepts_own_signature() -> anyhow::Result<()> {
        let sig = sign(b"secret", "a.b")?;
        assert!(verify(b"secret", "a.b", &sig));
        Ok(())
    }

    #[test]
    fn verify_rejects_wrong_key_or_input() -> anyhow::Result<()> {
        let sig = sign(b"secret", "a.b")?;
        assert!(!verify(b"other", "a.b", &sig));
        assert!(!verify(b"secret", "a.c", &sig));
        Ok(())
    }

    #[test]
    fn verify_rejects_malformed_signatures() -> anyhow::Result<()> {
        let sig = sign(b"secret", "a.b")?;
        assert!(!verify(b"secret", "a.b", "not base64!"));
        assert!(!verify(b"secret", "a.b", &sig[..20]));
        assert!(!verify(b"secret", "a.b", ""));
        Ok(())
    }
}
