use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("parsing request: {0}")]
    Request(#[source] serde_json::Error),

    #[error("missing {section} field: {field}")]
    MissingField {
        section: &'static str,
        field: &'static str,
    },

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding message file {}: {source}", .path.display())]
    MessageFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("globbing pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no files matched the pattern: {0}")]
    NoMatch(String),

    #[error("calling {method}: {source}")]
    Transport {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("slack {method} failed: {code}")]
    Api { method: &'static str, code: String },

    #[error("slack {method} returned an incomplete response: {detail}")]
    MalformedResponse {
        method: &'static str,
        detail: String,
    },

    #[error("upload failed with status {status}: {body}")]
    UploadRejected { status: u16, body: String },

    #[error("encoding response: {0}")]
    Response(#[source] serde_json::Error),
}

impl ResourceError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn api(method: &'static str, code: impl Into<String>) -> Self {
        Self::Api {
            method,
            code: code.into(),
        }
    }

    /// Slack reports a duplicate reaction as `already_reacted`.
    pub fn is_already_reacted(&self) -> bool {
        matches!(self, Self::Api { code, .. } if code == "already_reacted")
    }
}
