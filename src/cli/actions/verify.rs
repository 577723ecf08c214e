use crate::clock::SystemClock;
use crate::token::{TokenConfig, TokenType, TokenVerifier};
use anyhow::{Result, anyhow};
use std::sync::Arc;

#[derive(Debug)]
pub struct Args {
    pub token: String,
    pub token_type: TokenType,
    pub config: TokenConfig,
}

/// Verify a token against the configured secret for its type and print the claims.
/// # Errors
/// Returns the verification error code if the token is rejected.
pub async fn execute(args: Args) -> Result<()> {
    let json = render(args)?;
    println!("{json}");
    Ok(())
}

fn render(args: Args) -> Result<String> {
    let verifier = TokenVerifier::new(Arc::new(args.config), Arc::new(SystemClock));
    let claims = verifier
        .verify(&args.token, args.token_type)
        .map_err(|err| anyhow!("{}: {err}", err.code()))?;
    Ok(serde_json::to_string_pretty(&claims)?)
}
