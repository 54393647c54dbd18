use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Resource version: a single `timestamp` key holding the Slack message ts.
pub type Version = BTreeMap<String, String>;

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn version_from_ts(ts: impl Into<String>) -> Version {
    let mut version = Version::new();
    version.insert("timestamp".to_string(), ts.into());
    version
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel_id: String,
}

/// Slack post parameters passed through untouched on post and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_user: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_broadcast: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_names: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfurl_links: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfurl_media: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrkdwn: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub thread_ts: String,
    #[serde(flatten)]
    pub options: MessageOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadSpec {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channels: Option<String>,
}

impl UploadSpec {
    /// First non-blank entry of the comma-separated `channels` list.
    pub fn primary_channel(&self) -> Option<&str> {
        self.channels
            .as_deref()
            .and_then(|list| list.split(',').next())
            .map(str::trim)
            .filter(|channel| !channel.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutParams {
    #[serde(default)]
    pub message: Option<OutMessage>,
    #[serde(default)]
    pub message_file: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub upload: Option<UploadSpec>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emoji_reactions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thread_emoji_reactions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: Source,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: OutParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutResponse {
    pub version: Version,
    #[serde(default)]
    pub metadata: Vec<MetadataField>,
}

impl OutResponse {
    pub fn new(ts: impl Into<String>) -> Self {
        Self {
            version: version_from_ts(ts),
            metadata: Vec::new(),
        }
    }

    pub fn timestamp(&self) -> &str {
        self.version
            .get("timestamp")
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub version: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InRequest {
    #[serde(default)]
    pub version: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InResponse {
    pub version: Value,
}
