use crate::api::types::TokenResponse;
use crate::session::SessionService;
use crate::token::{Role, TokenConfig};
use anyhow::{Context, Result};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub user_id: String,
    pub role: Role,
    pub config: TokenConfig,
}

/// Mint a login grant. The registry lives only for this process, so the
/// printed refresh token can be verified but not redeemed elsewhere.
/// # Errors
/// Returns an error if the tokens cannot be issued or printed.
pub async fn execute(args: Args) -> Result<()> {
    let json = render(args)?;
    println!("{json}");
    Ok(())
}

fn render(args: Args) -> Result<String> {
    debug!(
        user_id = %args.user_id,
        role = %args.role,
        access_ttl_seconds = args.config.access_ttl_seconds(),
        refresh_ttl_seconds = args.config.refresh_ttl_seconds(),
        "issuing tokens"
    );
    let sessions = SessionService::in_memory(args.config);
    let grant = sessions
        .login(&args.user_id, args.role)
        .with_context(|| format!("failed to issue tokens for {}", args.user_id))?;
    serde_json::to_string_pretty(&TokenResponse::from(grant)).context("failed to encode token response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_prints_token_pair() -> Result<()> {
        let json = render(Args {
            user_id: "u1".to_string(),
            role: Role::Admin,
            config: TokenConfig::development(),
        })?;
        let response: TokenResponse = serde_json::from_str(&json)?;
        assert_eq!(response.user.id, "u1");
        assert_eq!(response.user.role, Role::Admin);
        assert_eq!(response.access_token.split('.').count(), 3);
        Ok(())
    }

    #[test]
    fn render_rejects_empty_user() {
        let result = render(Args {
            user_id: String::new(),
            role: Role::Agent,
            config: TokenConfig::development(),
        });
        assert!(result.is_err());
    }
}
