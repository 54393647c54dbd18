use crate::channels::{SlackApi, UploadedFile};
use crate::error::{ResourceError, Result};
use crate::host::FileStore;
use crate::types::{MetadataField, OutMessage, OutResponse, UploadSpec};
use std::path::Path;
use tracing::{info, warn};

/// Bytes and naming resolved from an upload spec.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPayload {
    pub content: Vec<u8>,
    pub filename: String,
    pub title: String,
}

pub fn resolve_payload(
    spec: &UploadSpec,
    base_dir: &Path,
    files: &dyn FileStore,
    default_filename: &str,
) -> Result<UploadPayload> {
    let pattern = spec.file.as_deref().filter(|pattern| !pattern.is_empty());
    let inline = spec.content.as_deref().filter(|content| !content.is_empty());

    let (content, filename) = match (pattern, inline) {
        (Some(pattern), None) => {
            let full_pattern = base_dir.join(pattern);
            let path = files
                .glob(&full_pattern.to_string_lossy())?
                .into_iter()
                .next()
                .ok_or_else(|| ResourceError::NoMatch(pattern.to_string()))?;
            info!(path = %path.display(), "about to upload");
            let content = files
                .read(&path)
                .map_err(|source| ResourceError::io("reading upload file", &path, source))?;
            let filename = match spec.filename.as_deref().filter(|name| !name.is_empty()) {
                Some(name) => name.to_string(),
                None => path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| default_filename.to_string()),
            };
            (content, filename)
        }
        (None, Some(content)) => {
            info!("about to upload specified content as file");
            let filename = spec
                .filename
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| default_filename.to_string());
            (content.as_bytes().to_vec(), filename)
        }
        (Some(_), Some(_)) => {
            return Err(ResourceError::Invalid(
                "upload.file and upload.content are mutually exclusive".to_string(),
            ))
        }
        (None, None) => {
            return Err(ResourceError::Invalid(
                "upload needs either content or a file pattern".to_string(),
            ))
        }
    };

    let title = spec
        .title
        .clone()
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| filename.clone());

    Ok(UploadPayload {
        content,
        filename,
        title,
    })
}

/// Runs the external upload handshake and records the file in `response`.
///
/// After the file is finalized, the posted message is edited to link it.
/// That edit is best effort: a failure is logged and the upload still
/// counts.
pub async fn upload_file(
    api: &dyn SlackApi,
    channel: &str,
    message: &OutMessage,
    spec: &UploadSpec,
    payload: UploadPayload,
    response: &mut OutResponse,
) -> Result<UploadedFile> {
    let length = payload.content.len();
    info!(filename = %payload.filename, length, "requesting upload url");
    let slot = api.get_upload_url(&payload.filename, length).await?;
    info!(file_id = %slot.file_id, "got upload url");

    api.upload_bytes(&slot.upload_url, &payload.content).await?;
    info!("file content uploaded");

    let share_channel = spec.primary_channel();
    let file = api
        .complete_upload(&slot.file_id, &payload.title, share_channel)
        .await?;

    let ts = response.timestamp().to_string();
    if ts.is_empty() || file.permalink.is_empty() {
        warn!(file_id = %file.id, "skipping file link on message");
    } else if let Err(err) = link_file(api, channel, &ts, message, &file).await {
        warn!(file_id = %file.id, "could not link file from message: {err}");
    }

    info!(name = %file.name, url = %file.url_private, "upload completed");
    response.metadata.push(MetadataField {
        name: file.name.clone(),
        value: file.url_private.clone(),
    });
    Ok(file)
}

async fn link_file(
    api: &dyn SlackApi,
    channel: &str,
    ts: &str,
    message: &OutMessage,
    file: &UploadedFile,
) -> Result<()> {
    let mut linked = message.clone();
    linked.text = if message.text.is_empty() {
        format!("File: {}", file.permalink)
    } else {
        format!("{}\n\nFile: {}", message.text, file.permalink)
    };
    api.update_message(channel, ts, &linked).await?;
    Ok(())
}
