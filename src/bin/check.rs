//! `check`: report the requested version, if any, as the only version.

use clap::Parser;
use slack_chat_resource::adapters::{check, read_request, write_response};
use slack_chat_resource::config::load_config;
use slack_chat_resource::types::CheckRequest;
use slack_chat_resource::{fatal, init_tracing, parse_cli};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "check", about = "Echo the current version of the Slack resource")]
struct Cli {}

fn main() -> ExitCode {
    if let Err(code) = parse_cli::<Cli>() {
        return code;
    }

    init_tracing(&load_config().log.filter);

    let result = read_request::<CheckRequest>(std::io::stdin().lock())
        .map(check::run)
        .and_then(|versions| write_response(std::io::stdout().lock(), &versions));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fatal(&err),
    }
}
