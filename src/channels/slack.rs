use crate::error::{ResourceError, Result};
use crate::types::OutMessage;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Opaque upload target handed out by `files.getUploadURLExternal`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadSlot {
    #[serde(default)]
    pub upload_url: String,
    #[serde(default)]
    pub file_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadedFile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url_private: String,
    #[serde(default)]
    pub permalink: String,
}

/// The slice of the Slack Web API the resource relies on.
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Returns the new message's ts.
    async fn post_message(&self, channel: &str, message: &OutMessage) -> Result<String>;

    /// Returns the ts reported for the edited message.
    async fn update_message(&self, channel: &str, ts: &str, message: &OutMessage)
        -> Result<String>;

    async fn get_upload_url(&self, filename: &str, length: usize) -> Result<UploadSlot>;

    async fn upload_bytes(&self, upload_url: &str, content: &[u8]) -> Result<()>;

    async fn complete_upload(
        &self,
        file_id: &str,
        title: &str,
        channel_id: Option<&str>,
    ) -> Result<UploadedFile>;

    async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<()>;
}

#[derive(Serialize)]
struct ChatPayload<'a> {
    channel: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ts: Option<&'a str>,
    #[serde(flatten)]
    message: &'a OutMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    ts: String,
}

#[derive(Deserialize)]
struct CompleteUploadResponse {
    #[serde(default)]
    files: Vec<UploadedFile>,
    #[serde(default)]
    file: Option<UploadedFile>,
}

#[derive(Serialize)]
struct CompleteFile<'a> {
    id: &'a str,
    title: &'a str,
}

pub struct SlackClient {
    http: Client,
    api_url: String,
    token: String,
}

impl SlackClient {
    pub fn new(http: Client, api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.api_url, method)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let resp = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|source| ResourceError::Transport { method, source })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ResourceError::api(
                method,
                format!("http status {}: {}", status.as_u16(), body),
            ));
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|source| ResourceError::Transport { method, source })?;
        debug!(method, response = %value, "slack api response");

        if !value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false) {
            let code = value
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown_error");
            return Err(ResourceError::api(method, code));
        }

        serde_json::from_value(value).map_err(|err| ResourceError::MalformedResponse {
            method,
            detail: err.to_string(),
        })
    }

    async fn chat(
        &self,
        method: &'static str,
        channel: &str,
        ts: Option<&str>,
        message: &OutMessage,
    ) -> Result<String> {
        let payload = ChatPayload {
            channel,
            ts,
            message,
        };
        let request = self.http.post(self.endpoint(method)).json(&payload);
        let resp: ChatResponse = self.call(method, request).await?;
        if resp.ts.is_empty() {
            return Err(ResourceError::MalformedResponse {
                method,
                detail: "missing ts".to_string(),
            });
        }
        Ok(resp.ts)
    }
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn post_message(&self, channel: &str, message: &OutMessage) -> Result<String> {
        self.chat("chat.postMessage", channel, None, message).await
    }

    async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        message: &OutMessage,
    ) -> Result<String> {
        self.chat("chat.update", channel, Some(ts), message).await
    }

    async fn get_upload_url(&self, filename: &str, length: usize) -> Result<UploadSlot> {
        let method = "files.getUploadURLExternal";
        let length = length.to_string();
        let request = self
            .http
            .post(self.endpoint(method))
            .form(&[("filename", filename), ("length", length.as_str())]);
        let slot: UploadSlot = self.call(method, request).await?;
        if slot.upload_url.is_empty() || slot.file_id.is_empty() {
            return Err(ResourceError::MalformedResponse {
                method,
                detail: "missing upload_url or file_id".to_string(),
            });
        }
        Ok(slot)
    }

    async fn upload_bytes(&self, upload_url: &str, content: &[u8]) -> Result<()> {
        let method = "upload";
        let resp = self
            .http
            .put(upload_url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(content.to_vec())
            .send()
            .await
            .map_err(|source| ResourceError::Transport { method, source })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ResourceError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn complete_upload(
        &self,
        file_id: &str,
        title: &str,
        channel_id: Option<&str>,
    ) -> Result<UploadedFile> {
        let method = "files.completeUploadExternal";
        let files = serde_json::to_string(&[CompleteFile { id: file_id, title }]).map_err(|err| {
            ResourceError::Invalid(format!("encoding files for {method}: {err}"))
        })?;
        let mut form = vec![("files", files)];
        if let Some(channel) = channel_id {
            form.push(("channel_id", channel.to_string()));
        }
        let request = self.http.post(self.endpoint(method)).form(&form);
        let resp: CompleteUploadResponse = self.call(method, request).await?;

        let has_id = |file: &UploadedFile| !file.id.is_empty();
        let file = resp
            .files
            .into_iter()
            .next()
            .filter(has_id)
            .or(resp.file.filter(has_id))
            .ok_or_else(|| ResourceError::MalformedResponse {
                method,
                detail: "no file information in response".to_string(),
            })?;
        Ok(file)
    }

    async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<()> {
        let method = "reactions.add";
        let payload = serde_json::json!({
            "channel": channel,
            "timestamp": ts,
            "name": name,
        });
        let request = self.http.post(self.endpoint(method)).json(&payload);
        let _: Value = self.call(method, request).await?;
        Ok(())
    }
}
