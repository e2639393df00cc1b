use chrono::{DateTime, Utc};
use serde::Serialize;

use super::dates::is_overdue;
use super::domain::{
    Employee, RiskLevel, Suggestion, SuggestionPriority, SuggestionStatus,
};

/// Per-status slice of the suggestion collection, in rank order.
#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: SuggestionStatus,
    pub status_label: &'static str,
    pub count: usize,
}

/// Per-priority slice of the suggestion collection.
#[derive(Debug, Clone, Serialize)]
pub struct PriorityCountEntry {
    pub priority: SuggestionPriority,
    pub priority_label: &'static str,
    pub count: usize,
}

/// Headline figures for the dashboard landing view.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_suggestions: usize,
    pub status_counts: Vec<StatusCountEntry>,
    pub priority_counts: Vec<PriorityCountEntry>,
    pub high_risk_employees: usize,
    pub overdue: usize,
    pub completion_rate_pct: u8,
}

impl DashboardSummary {
    pub fn build(employees: &[Employee], suggestions: &[Suggestion], now: DateTime<Utc>) -> Self {
        let status_counts = SuggestionStatus::ordered()
            .into_iter()
            .map(|status| StatusCountEntry {
                status,
                status_label: status.label(),
                count: suggestions.iter().filter(|s| s.status == status).count(),
            })
            .collect();

        let priority_counts = SuggestionPriority::ordered()
            .into_iter()
            .map(|priority| PriorityCountEntry {
                priority,
                priority_label: priority.label(),
                count: suggestions.iter().filter(|s| s.priority == priority).count(),
            })
            .collect();

        let high_risk_employees = employees
            .iter()
            .filter(|employee| employee.risk_level == RiskLevel::High)
            .count();

        let overdue = suggestions
            .iter()
            .filter(|s| is_overdue(s.date_created, s.status, now))
            .count();

        let completed = suggestions
            .iter()
            .filter(|s| s.status == SuggestionStatus::Completed)
            .count();
        let completion_rate_pct = if suggestions.is_empty() {
            0
        } else {
            ((completed as f64 / suggestions.len() as f64) * 100.0).round() as u8
        };

        Self {
            total_suggestions: suggestions.len(),
            status_counts,
            priority_counts,
            high_risk_employees,
            overdue,
            completion_rate_pct,
        }
    }

    pub fn status_count(&self, status: SuggestionStatus) -> usize {
        self.status_counts
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}
