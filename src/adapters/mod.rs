//! Entry flows for the three resource commands. Each reads one JSON request
//! and produces one JSON response; the binaries own stdin/stdout.

pub mod check;
pub mod fetch;
pub mod out;

use crate::error::{ResourceError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

pub fn read_request<T: DeserializeOwned>(reader: impl Read) -> Result<T> {
    serde_json::from_reader(reader).map_err(ResourceError::Request)
}

/// Writes `response` as one line of JSON.
pub fn write_response<T: Serialize>(mut writer: impl Write, response: &T) -> Result<()> {
    let mut encoded = serde_json::to_vec(response).map_err(ResourceError::Response)?;
    encoded.push(b'\n');
    writer
        .write_all(&encoded)
        .and_then(|()| writer.flush())
        .map_err(|source| ResourceError::io("writing response to", "stdout", source))
}
