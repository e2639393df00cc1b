//! Suggestion dashboard core: the domain model, the filter and sort
//! engines behind the table view, enrichment helpers (currency, dates,
//! summary), the document-store abstraction, and the HTTP router the
//! API service mounts.

pub mod currency;
pub mod dates;
pub mod domain;
pub mod filter;
pub mod roster;
pub mod router;
pub mod service;
pub mod sort;
pub mod store;
pub mod summary;

pub use currency::{format_currency, is_valid_currency, parse_currency, CostValue};
pub use dates::{format_date, is_overdue, relative_time};
pub use domain::{
    Employee, EmployeeId, NewSuggestion, RiskLevel, Suggestion, SuggestionId, SuggestionPriority,
    SuggestionSource, SuggestionStatus, SuggestionType, SuggestionUpdate,
};
pub use filter::{filter_suggestions, SuggestionFilters};
pub use roster::{EmployeeRosterImporter, RosterImportError};
pub use router::{dashboard_router, DashboardContext};
pub use service::{DashboardService, ServiceError, SuggestionView, UNKNOWN_EMPLOYEE};
pub use sort::{sort_suggestions, SortDirection, SortField};
pub use store::{EmployeeStore, StoreError, SuggestionStore};
pub use summary::DashboardSummary;
