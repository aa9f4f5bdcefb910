use chrono::{DateTime, Datelike, Local};

/// "just now", "45m ago", "3h ago", "5d ago" inside a week; a date beyond that
pub fn format_age(timestamp: &DateTime<Local>) -> String {
    format_age_at(timestamp, &Local::now())
}

pub(crate) fn format_age_at(timestamp: &DateTime<Local>, now: &DateTime<Local>) -> String {
    let elapsed = now.signed_duration_since(*timestamp);

    if elapsed.num_days() >= 7 {
        return if timestamp.year() == now.year() {
            timestamp.format("%b %-d").to_string()
        } else {
            timestamp.format("%b %-d, %Y").to_string()
        };
    }

    match (elapsed.num_days(), elapsed.num_hours(), elapsed.num_minutes()) {
        (days, _, _) if days > 0 => format!("{}d ago", days),
        (_, hours, _) if hours > 0 => format!("{}h ago", hours),
        (_, _, minutes) if minutes > 0 => format!("{}m ago", minutes),
        _ => "just now".to_string(),
    }
}
