use crate::channels::SlackApi;
use crate::error::{ResourceError, Result};
use crate::host::{Environment, FileStore};
use crate::interpolate::Interpolator;
use crate::types::{OutMessage, OutParams, OutResponse};
use std::path::Path;
use tracing::info;

/// Picks the message to send: a JSON message file is used as-is, an inline
/// message has its text and thread ts interpolated.
pub fn resolve_message(
    params: &OutParams,
    base_dir: &Path,
    env: &dyn Environment,
    files: &dyn FileStore,
) -> Result<OutMessage> {
    let message_file = params.message_file.as_deref().filter(|file| !file.is_empty());
    match (message_file, params.message.as_ref()) {
        (Some(file), None) => {
            let path = base_dir.join(file);
            let raw = files
                .read(&path)
                .map_err(|source| ResourceError::io("opening message file", &path, source))?;
            serde_json::from_slice(&raw)
                .map_err(|source| ResourceError::MessageFile { path, source })
        }
        (None, Some(message)) => {
            let mut message = message.clone();
            Interpolator::new(base_dir, env, files).interpolate_message(&mut message)?;
            Ok(message)
        }
        (Some(_), Some(_)) => Err(ResourceError::Invalid(
            "params.message and params.message_file are mutually exclusive".to_string(),
        )),
        (None, None) => Err(ResourceError::MissingField {
            section: "params",
            field: "message or message_file",
        }),
    }
}

/// Posts a new message, or edits the one whose ts is stored in the file
/// named by `ts_file`.
pub async fn dispatch(
    api: &dyn SlackApi,
    channel: &str,
    message: &OutMessage,
    ts_file: Option<&str>,
    base_dir: &Path,
    files: &dyn FileStore,
) -> Result<OutResponse> {
    let ts = match ts_file.filter(|file| !file.is_empty()) {
        None => {
            info!(channel, "posting new message");
            api.post_message(channel, message).await?
        }
        Some(file) => {
            let path = base_dir.join(file);
            let raw = files
                .read(&path)
                .map_err(|source| ResourceError::io("reading timestamp file", &path, source))?;
            let target = String::from_utf8_lossy(&raw).into_owned();
            info!(channel, ts = %target, "updating message");
            api.update_message(channel, &target, message).await?
        }
    };
    Ok(OutResponse::new(ts))
}
