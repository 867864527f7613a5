//! Reusable formatting utilities for CLI output

use chrono::{DateTime, Duration, Utc};

/// Format a duration as `2h 15m 30s`, `5m 10s` or `45s`.
///
/// Long durations roll up into days (`3d 4h`).
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);

    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// How long ago the cache was filled, or "never" for an empty cache
pub fn format_age(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if updated_at == DateTime::<Utc>::UNIX_EPOCH {
        return "never".to_string();
    }
    format!("{} ago", format_duration(now - updated_at))
}
