//! Credential check supplied by the host service.
//!
//! Password storage and hashing are the host's business; the router only needs
//! to turn a username and password into a user id and role.

use crate::token::Role;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: Role,
}

pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when the credentials do not match a user.
    fn authenticate<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<Identity>>> + Send + 'a>>;
}
