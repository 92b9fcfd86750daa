//! Video-URL parsing.

use url::Url;

/// Extract a video id from a user-supplied `YouTube` URL.
///
/// Recognizes the `youtube.com/watch?v=<id>` query form (independent of the
/// ordering of other query parameters) and the `youtu.be/<id>` short-link
/// form, with or without a scheme. Returns `None` for any other shape; the
/// caller treats that as a user-input error, never a crash.
#[must_use]
pub fn extract_video_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Users paste URLs without a scheme often enough that the original
    // accepted them; retry with an https prefix before giving up.
    let parsed = Url::parse(trimmed)
        .or_else(|_| Url::parse(&format!("https://{trimmed}")))
        .ok()?;

    let host = parsed.host_str()?;

    if host == "youtu.be" {
        return parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|id| !id.is_empty())
            .map(ToOwned::to_owned);
    }

    if host == "youtube.com" || host.ends_with(".youtube.com") {
        return parsed
            .query_pairs()
            .find(|(key, _)| key.as_ref() == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty());
    }

    None
}
