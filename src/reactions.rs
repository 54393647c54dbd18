use crate::channels::SlackApi;
use tracing::{info, warn};

/// Trims whitespace and strips at most one leading and one trailing colon,
/// never reducing a name below one character.
pub fn sanitize_emoji_name(name: &str) -> String {
    let mut name = name.trim();
    if name.len() > 1 {
        if let Some(rest) = name.strip_prefix(':') {
            name = rest;
        }
    }
    if name.len() > 1 {
        if let Some(rest) = name.strip_suffix(':') {
            name = rest;
        }
    }
    name.to_string()
}

/// Adds each reaction in turn. Failures are logged and skipped; a
/// reaction that is already present counts as added.
pub async fn add_reactions(api: &dyn SlackApi, channel: &str, ts: &str, emojis: &[String]) {
    if ts.is_empty() || emojis.is_empty() {
        return;
    }

    for emoji in emojis {
        let name = sanitize_emoji_name(emoji);
        if name.is_empty() {
            continue;
        }
        match api.add_reaction(channel, ts, &name).await {
            Ok(()) => info!(ts, reaction = %name, "added reaction"),
            Err(err) if err.is_already_reacted() => {
                info!(ts, reaction = %name, "reaction already present")
            }
            Err(err) => warn!(ts, reaction = %name, "error adding reaction: {err}"),
        }
    }
}
