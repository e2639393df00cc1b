use chrono::{DateTime, Duration, Utc};

use super::domain::SuggestionStatus;

/// Suggestions still open after this long are flagged as overdue.
pub const OVERDUE_AFTER_DAYS: i64 = 14;

/// Short display form, e.g. "12 Jan 2024".
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Coarse human-readable age relative to `now`; falls back to the full
/// date beyond a week.
pub fn relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(date);

    if elapsed < Duration::minutes(1) {
        return "just now".to_string();
    }
    if elapsed < Duration::hours(1) {
        return plural(elapsed.num_minutes(), "minute");
    }
    if elapsed < Duration::days(1) {
        return plural(elapsed.num_hours(), "hour");
    }
    if elapsed < Duration::days(7) {
        return plural(elapsed.num_days(), "day");
    }

    format_date(date)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// A suggestion is overdue when it is still open (pending or in
/// progress) and was created more than [`OVERDUE_AFTER_DAYS`] ago.
pub fn is_overdue(
    date_created: DateTime<Utc>,
    status: SuggestionStatus,
    now: DateTime<Utc>,
) -> bool {
    matches!(
        status,
        SuggestionStatus::Pending | SuggestionStatus::InProgress
    ) && now.signed_duration_since(date_created) > Duration::days(OVERDUE_AFTER_DAYS)
}
