//! Refresh sessions: the registry and the rotation protocol built on it.

pub mod service;
pub mod store;

pub use service::{AuthContext, SessionGrant, SessionService};
pub use store::{MemoryRefreshStore, Redemption, RefreshEntry, RefreshStore};
