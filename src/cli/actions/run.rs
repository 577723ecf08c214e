use crate::cli::actions::{Action, issue, verify};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Issue(args) => issue::execute(args).await,
        Action::Verify(args) => verify::execute(args).await,
    }
}
