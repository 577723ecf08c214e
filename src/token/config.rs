use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

pub const DEFAULT_ACCESS_TTL_SECONDS: i64 = 900;
pub const DEFAULT_REFRESH_TTL_SECONDS: i64 = 604_800;
/// Longest accepted lifetime for either token class (ten years).
pub const MAX_TTL_SECONDS: i64 = 315_360_000;

/// Insecure development secret for access tokens. Never deploy with it.
pub const DEV_ACCESS_SECRET: &str = "cbsp-dev-access-secret-change-me";
/// Insecure development secret for refresh tokens. Never deploy with it.
pub const DEV_REFRESH_SECRET: &str = "cbsp-dev-refresh-secret-change-me";

/// Signing secrets and lifetimes for both token classes.
#[derive(Debug)]
pub struct TokenConfig {
    access_secret: SecretString,
    refresh_secret: SecretString,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl TokenConfig {
    #[must_use]
    pub fn new(access_secret: SecretString, refresh_secret: SecretString) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_ttl_seconds: DEFAULT_ACCESS_TTL_SECONDS,
            refresh_ttl_seconds: DEFAULT_REFRESH_TTL_SECONDS,
        }
    }

    /// Development configuration with the well-known fallback secrets.
    #[must_use]
    pub fn development() -> Self {
        Self::new(
            SecretString::from(DEV_ACCESS_SECRET.to_string()),
            SecretString::from(DEV_REFRESH_SECRET.to_string()),
        )
    }

    /// Build from raw settings (environment or flags).
    ///
    /// Blank secrets fall back to the development constants and TTLs go through
    /// [`normalize_ttl`]. Nothing here fails: a bad TTL never blocks startup.
    #[must_use]
    pub fn from_settings(
        access_secret: Option<&str>,
        refresh_secret: Option<&str>,
        access_ttl: Option<&str>,
        refresh_ttl: Option<&str>,
    ) -> Self {
        let access = secret_or_fallback(access_secret, DEV_ACCESS_SECRET, "access");
        let refresh = secret_or_fallback(refresh_secret, DEV_REFRESH_SECRET, "refresh");
        if access.expose_secret() == refresh.expose_secret() {
            warn!("access and refresh tokens share one secret; a leak of either forges both");
        }

        Self::new(access, refresh)
            .with_access_ttl_seconds(normalize_ttl(access_ttl, DEFAULT_ACCESS_TTL_SECONDS))
            .with_refresh_ttl_seconds(normalize_ttl(refresh_ttl, DEFAULT_REFRESH_TTL_SECONDS))
    }

    /// Values outside `1..=MAX_TTL_SECONDS` keep the default.
    #[must_use]
    pub fn with_access_ttl_seconds(mut self, seconds: i64) -> Self {
        if (1..=MAX_TTL_SECONDS).contains(&seconds) {
            self.access_ttl_seconds = seconds;
        }
        self
    }

    /// Values outside `1..=MAX_TTL_SECONDS` keep the default.
    #[must_use]
    pub fn with_refresh_ttl_seconds(mut self, seconds: i64) -> Self {
        if (1..=MAX_TTL_SECONDS).contains(&seconds) {
            self.refresh_ttl_seconds = seconds;
        }
        self
    }

    #[must_use]
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }

    #[must_use]
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }

    #[must_use]
    pub fn access_secret(&self) -> &[u8] {
        self.access_secret.expose_secret().as_bytes()
    }

    #[must_use]
    pub fn refresh_secret(&self) -> &[u8] {
        self.refresh_secret.expose_secret().as_bytes()
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::development()
    }
}

fn secret_or_fallback(value: Option<&str>, fallback: &str, kind: &str) -> SecretString {
    match value.map(str::trim) {
        Some(secret) if !secret.is_empty() => SecretString::from(secret.to_string()),
        _ => {
            warn!(kind, "no {kind} token secret configured, using the insecure development secret");
            SecretString::from(fallback.to_string())
        }
    }
}

/// Parse a TTL in seconds.
///
/// Unparsable, non-finite and non-positive values fall back to `fallback`, and
/// so do values above [`MAX_TTL_SECONDS`]. Fractional values are floored. A
/// value that floors to zero also falls back.
#[must_use]
pub fn normalize_ttl(value: Option<&str>, fallback: i64) -> i64 {
    let Some(parsed) = value.and_then(|v| v.trim().parse::<f64>().ok()) else {
        return fallback;
    };
    #[allow(clippy::cast_precision_loss)]
    let ceiling = MAX_TTL_SECONDS as f64;
    if !parsed.is_finite() || parsed <= 0.0 || parsed > ceiling {
        return fallback;
    }
    // in range, so the cast cannot truncate
    #[allow(clippy::cast_possible_truncation)]
    let seconds = parsed.floor() as i64;
    if seconds < 1 {
        fallback
    } else {
        seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ttl_uses_fallback_for_bad_values() {
        assert_eq!(normalize_ttl(None, 900), 900);
        assert_eq!(normalize_ttl(Some(""), 900), 900);
        assert_eq!(normalize_ttl(Some("abc"), 900), 900);
        assert_eq!(normalize_ttl(Some("0"), 900), 900);
        assert_eq!(normalize_ttl(Some("-5"), 900), 900);
        assert_eq!(normalize_ttl(Some("NaN"), 900), 900);
        assert_eq!(normalize_ttl(Some("inf"), 900), 900);
        assert_eq!(normalize_ttl(Some("0.5"), 900), 900);
        assert_eq!(normalize_ttl(Some("1e300"), 900), 900);
        assert_eq!(normalize_ttl(Some("9223372036854775807"), 900), 900);
        assert_eq!(normalize_ttl(Some("315360001"), 900), 900);
    }

    #[test]
    fn normalize_ttl_accepts_the_ceiling() {
        assert_eq!(normalize_ttl(Some("315360000"), 900), MAX_TTL_SECONDS);
    }

    #[test]
    fn normalize_ttl_floors_fractions() {
        assert_eq!(normalize_ttl(Some("60"), 900), 60);
        assert_eq!(normalize_ttl(Some(" 120 "), 900), 120);
        assert_eq!(normalize_ttl(Some("90.9"), 900), 90);
        assert_eq!(normalize_ttl(Some("1e3"), 900), 1_000);
    }

    #[test]
    fn defaults() {
        let config = TokenConfig::development();
        assert_eq!(config.access_ttl_seconds(), 900);
        assert_eq!(config.refresh_ttl_seconds(), 604_800);
        assert_eq!(config.access_secret(), DEV_ACCESS_SECRET.as_bytes());
        assert_eq!(config.refresh_secret(), DEV_REFRESH_SECRET.as_bytes());
        assert_ne!(config.access_secret(), config.refresh_secret());
    }

    #[test]
    fn builder_ignores_out_of_range_ttls() {
        let config = TokenConfig::development()
            .with_access_ttl_seconds(0)
            .with_refresh_ttl_seconds(-1);
        assert_eq!(config.access_ttl_seconds(), DEFAULT_ACCESS_TTL_SECONDS);
        assert_eq!(config.refresh_ttl_seconds(), DEFAULT_REFRESH_TTL_SECONDS);

        let config = TokenConfig::development()
            .with_access_ttl_seconds(i64::MAX)
            .with_refresh_ttl_seconds(MAX_TTL_SECONDS + 1);
        assert_eq!(config.access_ttl_seconds(), DEFAULT_ACCESS_TTL_SECONDS);
        assert_eq!(config.refresh_ttl_seconds(), DEFAULT_REFRESH_TTL_SECONDS);
    }

    #[test]
    fn from_settings_falls_back_on_blank_secrets() {
        let config = TokenConfig::from_settings(Some("  "), None, Some("60"), Some("-1"));
        assert_eq!(config.access_secret(), DEV_ACCESS_SECRET.as_bytes());
        assert_eq!(config.refresh_secret(), DEV_REFRESH_SECRET.as_bytes());
        assert_eq!(config.access_ttl_seconds(), 60);
        assert_eq!(config.refresh_ttl_seconds(), DEFAULT_REFRESH_TTL_SECONDS);
    }

    #[test]
    fn from_settings_uses_configured_secrets() {
        let config = TokenConfig::from_settings(Some("a-secret"), Some("r-secret"), None, None);
        assert_eq!(config.access_secret(), b"a-secret");
        assert_eq!(config.refresh_secret(), b"r-secret");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = TokenConfig::from_settings(Some("top-secret-a"), Some("top-secret-r"), None, None);
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret-a"));
        assert!(!debug.contains("top-secret-r"));
    }
}
