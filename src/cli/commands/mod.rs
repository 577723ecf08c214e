pub mod logging;
pub mod tokens;

use crate::token::Role;
use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_ISSUE: &str = "issue";
pub const CMD_VERIFY: &str = "verify";
pub const ARG_USER_ID: &str = "user-id";
pub const ARG_ROLE: &str = "role";
pub const ARG_TYPE: &str = "type";
pub const ARG_TOKEN: &str = "token";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("cbsp-auth")
        .about("Issue and verify CBSP access and refresh tokens")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_ISSUE)
                .about("Start a session and print its token pair as JSON")
                .arg(
                    Arg::new(ARG_USER_ID)
                        .long(ARG_USER_ID)
                        .help("Subject of the tokens")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_ROLE)
                        .long(ARG_ROLE)
                        .help("Role embedded in the tokens")
                        .default_value(Role::Agent.as_str())
                        .value_parser(Role::ALL.map(Role::as_str)),
                ),
        )
        .subcommand(
            Command::new(CMD_VERIFY)
                .about("Verify a token and print its claims as JSON")
                .arg(
                    Arg::new(ARG_TYPE)
                        .long(ARG_TYPE)
                        .help("Expected token type")
                        .default_value("access")
                        .value_parser(["access", "refresh"]),
                )
                .arg(
                    Arg::new(ARG_TOKEN)
                        .help("Compact token header.payload.signature")
                        .required(true),
                ),
        );

    let command = tokens::with_args(command);
    logging::with_args(command)
}
