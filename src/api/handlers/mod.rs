pub mod health;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod registry;
pub mod session;
