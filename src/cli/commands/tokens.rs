use crate::token::TokenConfig;
use clap::{Arg, ArgMatches, Command};

pub const ARG_ACCESS_SECRET: &str = "access-secret";
pub const ARG_REFRESH_SECRET: &str = "refresh-secret";
pub const ARG_ACCESS_TTL_SECONDS: &str = "access-ttl-seconds";
pub const ARG_REFRESH_TTL_SECONDS: &str = "refresh-ttl-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ACCESS_SECRET)
                .long(ARG_ACCESS_SECRET)
                .help("HMAC secret for access tokens (insecure development secret if unset)")
                .env("JWT_ACCESS_SECRET")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_REFRESH_SECRET)
                .long(ARG_REFRESH_SECRET)
                .help("HMAC secret for refresh tokens, must differ from the access secret")
                .env("JWT_REFRESH_SECRET")
                .hide_env_values(true)
                .global(true),
        )
        // TTLs stay strings: bad values fall back to the default instead of failing startup
        .arg(
            Arg::new(ARG_ACCESS_TTL_SECONDS)
                .long(ARG_ACCESS_TTL_SECONDS)
                .help("Access token lifetime in seconds")
                .env("AUTH_ACCESS_TTL_SECONDS")
                .default_value("900")
                .global(true),
        )
        .arg(
            Arg::new(ARG_REFRESH_TTL_SECONDS)
                .long(ARG_REFRESH_TTL_SECONDS)
                .help("Refresh token lifetime in seconds")
                .env("AUTH_REFRESH_TTL_SECONDS")
                .default_value("604800")
                .global(true),
        )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub access_secret: Option<String>,
    pub refresh_secret: Option<String>,
    pub access_ttl_seconds: Option<String>,
    pub refresh_ttl_seconds: Option<String>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned();
        Self {
            access_secret: get(ARG_ACCESS_SECRET),
            refresh_secret: get(ARG_REFRESH_SECRET),
            access_ttl_seconds: get(ARG_ACCESS_TTL_SECONDS),
            refresh_ttl_seconds: get(ARG_REFRESH_TTL_SECONDS),
        }
    }

    #[must_use]
    pub fn into_config(self) -> TokenConfig {
        TokenConfig::from_settings(
            self.access_secret.as_deref(),
            self.refresh_secret.as_deref(),
            self.access_ttl_seconds.as_deref(),
            self.refresh_ttl_seconds.as_deref(),
        )
    }
}
