use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::currency::format_currency;
use super::dates::is_overdue;
use super::domain::{
    Employee, EmployeeId, NewSuggestion, RiskLevel, Suggestion, SuggestionId, SuggestionSource,
    SuggestionStatus, SuggestionUpdate,
};
use super::filter::{filter_suggestions, SuggestionFilters};
use super::sort::{sort_suggestions, SortDirection, SortField};
use super::store::{EmployeeStore, StoreError, SuggestionStore};
use super::summary::DashboardSummary;
use crate::clock::Clock;

/// Display name used when a suggestion references an employee the store
/// no longer knows about. A dangling reference is a render fallback,
/// never a failure.
pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

/// Suggestion enriched for table rendering: resolved employee name,
/// overdue flag, and the display form of the estimated cost.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionView {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    pub employee_name: String,
    pub overdue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost_display: Option<String>,
}

/// Service composing the employee and suggestion stores behind the
/// dashboard's read and write operations.
pub struct DashboardService<E, S, C> {
    employees: Arc<E>,
    suggestions: Arc<S>,
    clock: C,
}

impl<E, S, C> DashboardService<E, S, C>
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    C: Clock,
{
    pub fn new(employees: Arc<E>, suggestions: Arc<S>, clock: C) -> Self {
        Self {
            employees,
            suggestions,
            clock,
        }
    }

    pub fn employees(&self) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.employees.list()?)
    }

    pub fn employee(&self, id: &EmployeeId) -> Result<Option<Employee>, ServiceError> {
        Ok(self.employees.get(id)?)
    }

    pub fn employees_by_department(&self, department: &str) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.employees.by_department(department)?)
    }

    pub fn employees_by_risk_level(
        &self,
        risk_level: RiskLevel,
    ) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.employees.by_risk_level(risk_level)?)
    }

    /// Load, filter, and order the suggestion collection for the table.
    pub fn suggestions(
        &self,
        filters: &SuggestionFilters,
        field: SortField,
        direction: SortDirection,
    ) -> Result<Vec<SuggestionView>, ServiceError> {
        let roster = self.employees.list()?;
        let all = self.suggestions.list()?;
        let filtered = filter_suggestions(&all, filters, Some(&roster));
        let sorted = sort_suggestions(&filtered, field, direction);
        Ok(sorted
            .into_iter()
            .map(|suggestion| self.view(suggestion, &roster))
            .collect())
    }

    pub fn suggestion(&self, id: &SuggestionId) -> Result<Option<SuggestionView>, ServiceError> {
        let Some(suggestion) = self.suggestions.get(id)? else {
            return Ok(None);
        };
        let roster = self.employees.list()?;
        Ok(Some(self.view(suggestion, &roster)))
    }

    pub fn suggestions_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<SuggestionView>, ServiceError> {
        let roster = self.employees.list()?;
        let records = self.suggestions.by_employee(employee_id)?;
        Ok(records
            .into_iter()
            .map(|suggestion| self.view(suggestion, &roster))
            .collect())
    }

    /// Create an admin-entered suggestion. New records always start
    /// pending with both timestamps set to now.
    pub fn create_suggestion(
        &self,
        data: NewSuggestion,
        created_by: &str,
    ) -> Result<Suggestion, ServiceError> {
        let now = self.clock.now();
        let suggestion = Suggestion {
            id: SuggestionId(String::new()),
            employee_id: data.employee_id,
            kind: data.kind,
            description: data.description,
            status: SuggestionStatus::Pending,
            priority: data.priority,
            source: SuggestionSource::Admin,
            created_by: created_by.to_string(),
            date_created: now,
            date_updated: now,
            date_completed: None,
            notes: data.notes,
            estimated_cost: data.estimated_cost,
        };
        let stored = self.suggestions.insert(suggestion)?;
        info!(id = %stored.id.0, employee = %stored.employee_id.0, "suggestion created");
        Ok(stored)
    }

    /// Apply a partial update. `date_updated` is always refreshed;
    /// `date_completed` is stamped whenever the update carries a
    /// completed status and is intentionally never cleared when the
    /// status later moves away from completed.
    pub fn update_suggestion(
        &self,
        id: &SuggestionId,
        update: SuggestionUpdate,
    ) -> Result<Suggestion, ServiceError> {
        let mut suggestion = self
            .suggestions
            .get(id)?
            .ok_or(ServiceError::SuggestionNotFound)?;

        let now = self.clock.now();
        if let Some(status) = update.status {
            suggestion.status = status;
            if status == SuggestionStatus::Completed {
                suggestion.date_completed = Some(now);
            }
        }
        if let Some(priority) = update.priority {
            suggestion.priority = priority;
        }
        if let Some(notes) = update.notes {
            suggestion.notes = Some(notes);
        }
        if let Some(estimated_cost) = update.estimated_cost {
            suggestion.estimated_cost = Some(estimated_cost);
        }
        suggestion.date_updated = now;

        self.suggestions.update(suggestion.clone())?;
        info!(id = %suggestion.id.0, status = suggestion.status.label(), "suggestion updated");
        Ok(suggestion)
    }

    pub fn delete_suggestion(&self, id: &SuggestionId) -> Result<(), ServiceError> {
        match self.suggestions.delete(id) {
            Ok(()) => {
                info!(id = %id.0, "suggestion deleted");
                Ok(())
            }
            Err(StoreError::NotFound) => Err(ServiceError::SuggestionNotFound),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolve an employee name, tolerating dangling references.
    pub fn employee_name(&self, id: &EmployeeId) -> Result<String, ServiceError> {
        Ok(self
            .employees
            .get(id)?
            .map(|employee| employee.name)
            .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string()))
    }

    pub fn summary(&self) -> Result<DashboardSummary, ServiceError> {
        let employees = self.employees.list()?;
        let suggestions = self.suggestions.list()?;
        Ok(DashboardSummary::build(
            &employees,
            &suggestions,
            self.clock.now(),
        ))
    }

    fn view(&self, suggestion: Suggestion, roster: &[Employee]) -> SuggestionView {
        let employee_name = roster
            .iter()
            .find(|employee| employee.id == suggestion.employee_id)
            .map(|employee| employee.name.clone())
            .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string());
        let overdue = is_overdue(suggestion.date_created, suggestion.status, self.clock.now());
        let estimated_cost_display = suggestion
            .estimated_cost
            .clone()
            .map(|cost| format_currency(cost));

        SuggestionView {
            suggestion,
            employee_name,
            overdue,
            estimated_cost_display,
        }
    }
}

/// Error raised by the dashboard service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("suggestion not found")]
    SuggestionNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}
