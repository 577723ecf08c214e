//! Map parsed CLI arguments to an [`Action`].

use crate::cli::actions::{Action, issue, verify};
use crate::cli::commands::{ARG_ROLE, ARG_TOKEN, ARG_TYPE, ARG_USER_ID, CMD_ISSUE, CMD_VERIFY, tokens};
use crate::token::{Role, TokenType};
use anyhow::{Context, Result, anyhow};

/// # Errors
/// Returns an error if the subcommand is unknown or a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub) = matches.subcommand().context("missing subcommand")?;
    let config = tokens::Options::parse(sub).into_config();

    match name {
        CMD_ISSUE => {
            let user_id = sub
                .get_one::<String>(ARG_USER_ID)
                .cloned()
                .context("missing required argument: --user-id")?;
            let role = sub
                .get_one::<String>(ARG_ROLE)
                .map_or(Ok(Role::Agent), |role| role.parse::<Role>())
                .map_err(|e| anyhow!(e))?;
            Ok(Action::Issue(issue::Args { user_id, role, config }))
        }
        CMD_VERIFY => {
            let token = sub
                .get_one::<String>(ARG_TOKEN)
                .cloned()
                .context("missing required argument: <token>")?;
            let token_type = sub
                .get_one::<String>(ARG_TYPE)
                .map_or(Ok(TokenType::Access), |typ| typ.parse::<TokenType>())
                .map_err(|e| anyhow!(e))?;
            Ok(Action::Verify(verify::Args {
                token,
                token_type,
                config,
            }))
        }
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}
