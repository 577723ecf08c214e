//! Access and refresh tokens: encoding, signing, issuance and verification.

pub mod claims;
pub mod codec;
pub mod config;
pub mod issuer;
pub mod signer;
pub mod verifier;

pub use claims::{Claims, Role, TokenType};
pub use config::TokenConfig;
pub use issuer::{AccessToken, RefreshToken, TokenIssuer};
pub use verifier::{verify, TokenVerifier};
