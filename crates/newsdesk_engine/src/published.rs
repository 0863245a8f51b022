use chrono::{DateTime, Utc};

/// Shown when the source has no usable timestamp.
pub const UNKNOWN_TIME: &str = "Recent";

/// Renders an RFC 3339 timestamp relative to `now`.
pub fn render_published(raw: Option<&str>, now: DateTime<Utc>) -> String {
    raw.map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|published| render_age(published.with_timezone(&Utc), now))
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// "{h}h ago" under a day, "{d}d ago" under a week, else "Mon D".
/// Timestamps in the future count as zero hours old.
pub fn render_age(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - published).num_hours().max(0);
    if hours < 24 {
        format!("{hours}h ago")
    } else if hours < 168 {
        format!("{}d ago", hours / 24)
    } else {
        published.format("%b %-d").to_string()
    }
}
