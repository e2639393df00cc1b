use super::domain::{Employee, EmployeeId, RiskLevel, Suggestion, SuggestionId, SuggestionStatus};

/// Read contract over the employee collection of the backing document
/// store. Implementations return `list` sorted by name ascending.
pub trait EmployeeStore: Send + Sync {
    fn list(&self) -> Result<Vec<Employee>, StoreError>;
    fn get(&self, id: &EmployeeId) -> Result<Option<Employee>, StoreError>;
    fn by_department(&self, department: &str) -> Result<Vec<Employee>, StoreError>;
    fn by_risk_level(&self, risk_level: RiskLevel) -> Result<Vec<Employee>, StoreError>;
}

/// Read/write contract over the suggestion collection. `insert` assigns
/// the identifier and returns the stored record; `list` and the lookup
/// queries return newest-updated first.
pub trait SuggestionStore: Send + Sync {
    fn list(&self) -> Result<Vec<Suggestion>, StoreError>;
    fn get(&self, id: &SuggestionId) -> Result<Option<Suggestion>, StoreError>;
    fn by_employee(&self, employee_id: &EmployeeId) -> Result<Vec<Suggestion>, StoreError>;
    fn by_status(&self, status: SuggestionStatus) -> Result<Vec<Suggestion>, StoreError>;
    fn insert(&self, suggestion: Suggestion) -> Result<Suggestion, StoreError>;
    fn update(&self, suggestion: Suggestion) -> Result<(), StoreError>;
    fn delete(&self, id: &SuggestionId) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
