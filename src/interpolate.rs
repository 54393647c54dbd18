//! `{{file}}` / `{{$VAR}}` substitution for inline message text.
//!
//! The scan is a single pass. A placeholder opens at `{{` and closes at the
//! next `}}`; a `{{` seen while already inside one is plain text. If the text
//! ends inside a placeholder, everything from its opening `{{` is dropped.

use crate::error::{ResourceError, Result};
use crate::host::{Environment, FileStore};
use crate::types::OutMessage;
use std::path::Path;

pub struct Interpolator<'a> {
    base_dir: &'a Path,
    env: &'a dyn Environment,
    files: &'a dyn FileStore,
}

impl<'a> Interpolator<'a> {
    pub fn new(base_dir: &'a Path, env: &'a dyn Environment, files: &'a dyn FileStore) -> Self {
        Self {
            base_dir,
            env,
            files,
        }
    }

    pub fn interpolate(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        // Byte offset where the pending literal run starts.
        let mut literal_start = 0;
        let mut placeholder_start = 0;
        let mut inside = false;
        let mut prev = '\0';

        for (pos, c) in text.char_indices() {
            if inside {
                if prev == '}' && c == '}' {
                    inside = false;
                    let end = pos + 1;
                    out.push_str(&self.resolve(&text[placeholder_start + 2..end - 2])?);
                    literal_start = end;
                }
            } else if prev == '{' && c == '{' {
                inside = true;
                placeholder_start = pos - 1;
                out.push_str(&text[literal_start..placeholder_start]);
            }
            prev = c;
        }

        if !inside {
            out.push_str(&text[literal_start..]);
        }
        Ok(out)
    }

    /// Applied to the inline message only; options pass through untouched.
    pub fn interpolate_message(&self, message: &mut OutMessage) -> Result<()> {
        message.text = self.interpolate(&message.text)?;
        message.thread_ts = self.interpolate(&message.thread_ts)?;
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<String> {
        if let Some(var) = name.strip_prefix('$') {
            return Ok(self.env.var(var).unwrap_or_default());
        }
        let path = self.base_dir.join(name);
        self.files
            .read(&path)
            .and_then(|bytes| {
                String::from_utf8(bytes)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
            })
            .map_err(|source| ResourceError::io("reading template file", path, source))
    }
}
