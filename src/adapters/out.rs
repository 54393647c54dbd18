use crate::channels::SlackApi;
use crate::dispatch::{dispatch, resolve_message};
use crate::error::{ResourceError, Result};
use crate::host::{Environment, FileStore};
use crate::reactions::add_reactions;
use crate::types::{OutRequest, OutResponse};
use crate::upload::{resolve_payload, upload_file};
use std::path::Path;
use tracing::info;

/// Collaborators for one `out` run.
pub struct OutContext<'a> {
    pub base_dir: &'a Path,
    pub env: &'a dyn Environment,
    pub files: &'a dyn FileStore,
    pub api: &'a dyn SlackApi,
    pub default_filename: &'a str,
}

/// Rejects requests that cannot be sent, before anything leaves the host.
pub fn validate(request: &OutRequest) -> Result<()> {
    if request.source.token.is_empty() {
        return Err(ResourceError::MissingField {
            section: "source",
            field: "token",
        });
    }
    if request.source.channel_id.is_empty() {
        return Err(ResourceError::MissingField {
            section: "source",
            field: "channel_id",
        });
    }

    let params = &request.params;
    let has_file = params
        .message_file
        .as_deref()
        .is_some_and(|file| !file.is_empty());
    match (params.message.is_some(), has_file) {
        (true, true) => Err(ResourceError::Invalid(
            "params.message and params.message_file are mutually exclusive".to_string(),
        )),
        (false, false) => Err(ResourceError::MissingField {
            section: "params",
            field: "message or message_file",
        }),
        _ => Ok(()),
    }
}

/// Post or update, then optionally upload, then optionally react.
pub async fn run(request: OutRequest, ctx: &OutContext<'_>) -> Result<OutResponse> {
    validate(&request)?;
    let channel = request.source.channel_id.as_str();
    let params = &request.params;

    let message = resolve_message(params, ctx.base_dir, ctx.env, ctx.files)?;
    if let Ok(pretty) = serde_json::to_string_pretty(&message) {
        info!("about to send this message:\n{pretty}");
    }

    let mut response = dispatch(
        ctx.api,
        channel,
        &message,
        params.ts.as_deref(),
        ctx.base_dir,
        ctx.files,
    )
    .await?;

    if let Some(spec) = params.upload.as_ref() {
        let payload = resolve_payload(spec, ctx.base_dir, ctx.files, ctx.default_filename)?;
        upload_file(ctx.api, channel, &message, spec, payload, &mut response).await?;
    }

    if !params.emoji_reactions.is_empty() {
        let ts = response.timestamp().to_string();
        info!(ts = %ts, reactions = ?params.emoji_reactions, "adding reactions to message");
        add_reactions(ctx.api, channel, &ts, &params.emoji_reactions).await;
    }

    if !message.thread_ts.is_empty() && !params.thread_emoji_reactions.is_empty() {
        info!(
            ts = %message.thread_ts,
            reactions = ?params.thread_emoji_reactions,
            "adding reactions to thread parent"
        );
        add_reactions(
            ctx.api,
            channel,
            &message.thread_ts,
            &params.thread_emoji_reactions,
        )
        .await;
    }

    Ok(response)
}
