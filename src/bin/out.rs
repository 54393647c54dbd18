//! `out`: post or update a Slack message, optionally attach a file and add
//! reactions. Reads the request from stdin, writes the new version to stdout.

use clap::Parser;
use slack_chat_resource::adapters::out::{self, OutContext};
use slack_chat_resource::adapters::{read_request, write_response};
use slack_chat_resource::channels::SlackClient;
use slack_chat_resource::config::{load_config, Config};
use slack_chat_resource::host::{LocalFs, ProcessEnv};
use slack_chat_resource::types::OutRequest;
use slack_chat_resource::{fatal, init_tracing, parse_cli};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "out", about = "Post or update a Slack message for a pipeline step")]
struct Cli {
    /// Build directory that relative paths in the request resolve against
    source: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli: Cli = match parse_cli() {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    let config = load_config();
    init_tracing(&config.log.filter);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fatal(&err),
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let request: OutRequest = read_request(std::io::stdin().lock())?;
    let api = SlackClient::new(
        reqwest::Client::new(),
        config.slack.api_url.as_str(),
        request.source.token.as_str(),
    );
    let ctx = OutContext {
        base_dir: &cli.source,
        env: &ProcessEnv,
        files: &LocalFs,
        api: &api,
        default_filename: &config.upload.default_filename,
    };

    let response = out::run(request, &ctx).await?;
    write_response(std::io::stdout().lock(), &response)?;
    Ok(())
}
