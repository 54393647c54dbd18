//! `in`: record the fetched version's ts as `<destination>/timestamp`.

use clap::Parser;
use slack_chat_resource::adapters::{fetch, read_request, write_response};
use slack_chat_resource::config::load_config;
use slack_chat_resource::host::LocalFs;
use slack_chat_resource::types::InRequest;
use slack_chat_resource::{fatal, init_tracing, parse_cli};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "in", about = "Write the fetched message timestamp into the destination")]
struct Cli {
    /// Directory the timestamp file is written to
    destination: PathBuf,
}

fn main() -> ExitCode {
    let cli: Cli = match parse_cli() {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    init_tracing(&load_config().log.filter);

    let result = read_request::<InRequest>(std::io::stdin().lock())
        .and_then(|request| fetch::run(request, &cli.destination, &LocalFs))
        .and_then(|response| write_response(std::io::stdout().lock(), &response));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fatal(&err),
    }
}
