use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::domain::Suggestion;

/// Fields the dashboard table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    DateUpdated,
    Priority,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Return a new ordering of `suggestions` by `field`; the input is not
/// mutated. The underlying sort is stable, so ties keep their relative
/// input order.
pub fn sort_suggestions(
    suggestions: &[Suggestion],
    field: SortField,
    direction: SortDirection,
) -> Vec<Suggestion> {
    let mut sorted = suggestions.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare(a: &Suggestion, b: &Suggestion, field: SortField) -> Ordering {
    match field {
        SortField::DateUpdated => a.date_updated.cmp(&b.date_updated),
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Status => a.status.rank().cmp(&b.status.rank()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::domain::{
        EmployeeId, SuggestionId, SuggestionPriority, SuggestionSource, SuggestionStatus,
        SuggestionType,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn suggestion(id: &str, priority: SuggestionPriority, status: SuggestionStatus) -> Suggestion {
        Suggestion {
            id: SuggestionId(id.to_string()),
            employee_id: EmployeeId("e1".to_string()),
            kind: SuggestionType::Equipment,
            description: "Monitor riser".to_string(),
            status,
            priority,
            source: SuggestionSource::Admin,
            created_by: "admin@company.com".to_string(),
            date_created: Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
            date_updated: Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
            date_completed: None,
            notes: None,
            estimated_cost: None,
        }
    }

    fn ids(sorted: &[Suggestion]) -> Vec<&str> {
        sorted.iter().map(|s| s.id.0.as_str()).collect()
    }

    #[test]
    fn priority_desc_places_high_before_medium_before_low() {
        let set = vec![
            suggestion("low", SuggestionPriority::Low, SuggestionStatus::Pending),
            suggestion("high", SuggestionPriority::High, SuggestionStatus::Pending),
            suggestion("medium", SuggestionPriority::Medium, SuggestionStatus::Pending),
        ];

        let sorted = sort_suggestions(&set, SortField::Priority, SortDirection::Desc);
        assert_eq!(ids(&sorted), vec!["high", "medium", "low"]);
    }

    #[test]
    fn status_asc_follows_the_rank_table() {
        let set = vec![
            suggestion("dismissed", SuggestionPriority::Low, SuggestionStatus::Dismissed),
            suggestion("completed", SuggestionPriority::Low, SuggestionStatus::Completed),
            suggestion("pending", SuggestionPriority::Low, SuggestionStatus::Pending),
            suggestion("in_progress", SuggestionPriority::Low, SuggestionStatus::InProgress),
        ];

        let sorted = sort_suggestions(&set, SortField::Status, SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["pending", "in_progress", "completed", "dismissed"]);
    }

    #[test]
    fn equal_keys_keep_their_relative_input_order() {
        let set = vec![
            suggestion("first", SuggestionPriority::High, SuggestionStatus::Pending),
            suggestion("second", SuggestionPriority::High, SuggestionStatus::Pending),
            suggestion("third", SuggestionPriority::Low, SuggestionStatus::Pending),
        ];

        let sorted = sort_suggestions(&set, SortField::Priority, SortDirection::Desc);
        assert_eq!(ids(&sorted), vec!["first", "second", "third"]);
    }

    #[test]
    fn input_is_left_untouched() {
        let set = vec![
            suggestion("low", SuggestionPriority::Low, SuggestionStatus::Pending),
            suggestion("high", SuggestionPriority::High, SuggestionStatus::Pending),
        ];

        let _ = sort_suggestions(&set, SortField::Priority, SortDirection::Desc);
        assert_eq!(ids(&set), vec!["low", "high"]);
    }

    #[test]
    fn asc_then_desc_reverses_strictly_ordered_keys() {
        let mut set = Vec::new();
        for offset in 0..4 {
            let mut entry = suggestion(
                &format!("s{offset}"),
                SuggestionPriority::Medium,
                SuggestionStatus::Pending,
            );
            entry.date_updated += Duration::hours(offset);
            set.push(entry);
        }

        let asc = sort_suggestions(&set, SortField::DateUpdated, SortDirection::Asc);
        let desc = sort_suggestions(&asc, SortField::DateUpdated, SortDirection::Desc);
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }
}
