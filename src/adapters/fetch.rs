use crate::error::{ResourceError, Result};
use crate::host::FileStore;
use crate::types::{InRequest, InResponse};
use serde_json::Value;
use std::path::Path;
use tracing::info;

pub const TIMESTAMP_FILE: &str = "timestamp";

/// Accepts either a bare ts string or a `{"timestamp": ...}` object.
pub fn extract_timestamp(version: Option<&Value>) -> Result<String> {
    let ts = match version {
        Some(Value::String(ts)) => ts.as_str(),
        Some(Value::Object(map)) => map
            .get("timestamp")
            .and_then(|v| v.as_str())
            .unwrap_or_default(),
        _ => "",
    };
    if ts.is_empty() {
        let shape = match version {
            None | Some(Value::Null) => "null",
            Some(Value::Object(_)) => "object without timestamp",
            Some(Value::String(_)) => "empty string",
            Some(Value::Array(_)) => "array",
            Some(Value::Bool(_)) => "bool",
            Some(Value::Number(_)) => "number",
        };
        return Err(ResourceError::Invalid(format!(
            "unexpected version format: {shape}"
        )));
    }
    Ok(ts.to_string())
}

/// Writes the version's ts into `<destination>/timestamp` and echoes the
/// version.
pub fn run(request: InRequest, destination: &Path, files: &dyn FileStore) -> Result<InResponse> {
    let ts = extract_timestamp(request.version.as_ref())?;
    let path = destination.join(TIMESTAMP_FILE);
    files
        .write(&path, ts.as_bytes())
        .map_err(|source| ResourceError::io("writing timestamp file", &path, source))?;
    info!(ts = %ts, path = %path.display(), "wrote timestamp");

    Ok(InResponse {
        version: request.version.unwrap_or(Value::Null),
    })
}
