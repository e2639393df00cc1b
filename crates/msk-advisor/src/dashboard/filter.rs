use serde::Deserialize;

use super::domain::{
    Employee, EmployeeId, Suggestion, SuggestionPriority, SuggestionSource, SuggestionStatus,
    SuggestionType,
};

/// Optional filter criteria applied conjunctively. An absent field
/// imposes no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionFilters {
    #[serde(default)]
    pub employee: Option<EmployeeId>,
    #[serde(default)]
    pub category: Option<SuggestionType>,
    #[serde(default)]
    pub status: Option<SuggestionStatus>,
    #[serde(default)]
    pub source: Option<SuggestionSource>,
    #[serde(default)]
    pub priority: Option<SuggestionPriority>,
    #[serde(default)]
    pub search: Option<String>,
}

impl SuggestionFilters {
    pub fn is_empty(&self) -> bool {
        self.employee.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.source.is_none()
            && self.priority.is_none()
            && self.search.is_none()
    }
}

/// Reduce `suggestions` to the entries matching every present filter,
/// preserving input order. The free-text search is a single
/// case-insensitive substring test over the joined searchable fields;
/// the optional roster is only consulted to resolve employee names for
/// that search.
pub fn filter_suggestions(
    suggestions: &[Suggestion],
    filters: &SuggestionFilters,
    employees: Option<&[Employee]>,
) -> Vec<Suggestion> {
    suggestions
        .iter()
        .filter(|suggestion| matches(suggestion, filters, employees))
        .cloned()
        .collect()
}

fn matches(
    suggestion: &Suggestion,
    filters: &SuggestionFilters,
    employees: Option<&[Employee]>,
) -> bool {
    if let Some(employee) = &filters.employee {
        if suggestion.employee_id != *employee {
            return false;
        }
    }

    if let Some(category) = filters.category {
        if suggestion.kind != category {
            return false;
        }
    }

    if let Some(status) = filters.status {
        if suggestion.status != status {
            return false;
        }
    }

    if let Some(source) = filters.source {
        if suggestion.source != source {
            return false;
        }
    }

    if let Some(priority) = filters.priority {
        if suggestion.priority != priority {
            return false;
        }
    }

    if let Some(search) = filters.search.as_deref() {
        let term = search.to_lowercase();
        if !searchable_text(suggestion, employees).contains(&term) {
            return false;
        }
    }

    true
}

fn searchable_text(suggestion: &Suggestion, employees: Option<&[Employee]>) -> String {
    let employee_name = employees
        .and_then(|roster| {
            roster
                .iter()
                .find(|employee| employee.id == suggestion.employee_id)
        })
        .map(|employee| employee.name.as_str())
        .unwrap_or("");

    [
        suggestion.description.as_str(),
        suggestion.kind.label(),
        suggestion.status.label(),
        suggestion.priority.label(),
        suggestion.source.label(),
        employee_name,
        suggestion.notes.as_deref().unwrap_or(""),
        suggestion.estimated_cost.as_deref().unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::domain::{RiskLevel, SuggestionId};
    use chrono::{TimeZone, Utc};

    fn suggestion(id: &str, employee: &str, status: SuggestionStatus) -> Suggestion {
        Suggestion {
            id: SuggestionId(id.to_string()),
            employee_id: EmployeeId(employee.to_string()),
            kind: SuggestionType::Exercise,
            description: format!("Stretch break routine {id}"),
            status,
            priority: SuggestionPriority::Medium,
            source: SuggestionSource::Vida,
            created_by: "vida-system".to_string(),
            date_created: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            date_updated: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            date_completed: None,
            notes: None,
            estimated_cost: None,
        }
    }

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: EmployeeId(id.to_string()),
            name: name.to_string(),
            department: "IT".to_string(),
            job_title: "Developer".to_string(),
            workstation: "Desk-001".to_string(),
            risk_level: RiskLevel::High,
            last_assessment: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn empty_filters_return_input_unchanged() {
        let set = vec![
            suggestion("s1", "e1", SuggestionStatus::Pending),
            suggestion("s2", "e2", SuggestionStatus::Completed),
        ];
        let filtered = filter_suggestions(&set, &SuggestionFilters::default(), None);
        assert_eq!(filtered, set);
    }

    #[test]
    fn status_filter_is_an_order_preserving_subset() {
        let set = vec![
            suggestion("s1", "e1", SuggestionStatus::Pending),
            suggestion("s2", "e1", SuggestionStatus::Completed),
            suggestion("s3", "e2", SuggestionStatus::Pending),
        ];
        let filters = SuggestionFilters {
            status: Some(SuggestionStatus::Pending),
            ..Default::default()
        };

        let filtered = filter_suggestions(&set, &filters, None);
        let ids: Vec<&str> = filtered.iter().map(|s| s.id.0.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3"]);
    }

    #[test]
    fn conjunctive_filters_must_all_match() {
        let mut admin_entry = suggestion("s2", "e1", SuggestionStatus::Pending);
        admin_entry.source = SuggestionSource::Admin;
        let set = vec![suggestion("s1", "e1", SuggestionStatus::Pending), admin_entry];

        let filters = SuggestionFilters {
            status: Some(SuggestionStatus::Pending),
            source: Some(SuggestionSource::Admin),
            ..Default::default()
        };

        let filtered = filter_suggestions(&set, &filters, None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.0, "s2");
    }

    #[test]
    fn search_is_case_insensitive() {
        let set = vec![suggestion("s1", "e1", SuggestionStatus::Pending)];
        let filters = SuggestionFilters {
            search: Some("STRETCH".to_string()),
            ..Default::default()
        };

        let filtered = filter_suggestions(&set, &filters, None);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn search_matches_resolved_employee_name() {
        let set = vec![
            suggestion("s1", "e1", SuggestionStatus::Pending),
            suggestion("s2", "e2", SuggestionStatus::Pending),
        ];
        let roster = vec![employee("e1", "Sarah Johnson"), employee("e2", "Michael Chen")];

        let filters = SuggestionFilters {
            search: Some("johnson".to_string()),
            ..Default::default()
        };

        let filtered = filter_suggestions(&set, &filters, Some(&roster));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.0, "s1");
    }

    #[test]
    fn search_falls_back_to_empty_name_without_roster() {
        let set = vec![suggestion("s1", "e1", SuggestionStatus::Pending)];
        let filters = SuggestionFilters {
            search: Some("johnson".to_string()),
            ..Default::default()
        };

        assert!(filter_suggestions(&set, &filters, None).is_empty());
    }

    #[test]
    fn search_covers_notes_and_estimated_cost() {
        let mut with_notes = suggestion("s1", "e1", SuggestionStatus::Pending);
        with_notes.notes = Some("Equipment ordered, awaiting delivery".to_string());
        let mut with_cost = suggestion("s2", "e1", SuggestionStatus::Pending);
        with_cost.estimated_cost = Some("£120.00".to_string());
        let set = vec![with_notes, with_cost];

        let filters = SuggestionFilters {
            search: Some("awaiting".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_suggestions(&set, &filters, None)[0].id.0, "s1");

        let filters = SuggestionFilters {
            search: Some("£120".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_suggestions(&set, &filters, None)[0].id.0, "s2");
    }

    #[test]
    fn no_match_yields_empty_result() {
        let set = vec![suggestion("s1", "e1", SuggestionStatus::Pending)];
        let filters = SuggestionFilters {
            employee: Some(EmployeeId("e9".to_string())),
            ..Default::default()
        };
        assert!(filter_suggestions(&set, &filters, None).is_empty());
    }
}
