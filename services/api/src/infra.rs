use chrono::{DateTime, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use msk_advisor::dashboard::{
    Employee, EmployeeId, RiskLevel, StoreError, Suggestion, SuggestionId, SuggestionPriority,
    SuggestionSource, SuggestionStatus, SuggestionType,
};
use msk_advisor::dashboard::{EmployeeStore, SuggestionStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Employee collection held in process memory. Stands in for the hosted
/// document store behind the same trait.
#[derive(Default)]
pub(crate) struct InMemoryEmployeeStore {
    records: Mutex<HashMap<EmployeeId, Employee>>,
}

impl InMemoryEmployeeStore {
    pub(crate) fn with_employees(employees: Vec<Employee>) -> Self {
        let records = employees
            .into_iter()
            .map(|employee| (employee.id.clone(), employee))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn list(&self) -> Result<Vec<Employee>, StoreError> {
        let guard = self.records.lock().expect("employee mutex poisoned");
        let mut employees: Vec<Employee> = guard.values().cloned().collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(employees)
    }

    fn get(&self, id: &EmployeeId) -> Result<Option<Employee>, StoreError> {
        let guard = self.records.lock().expect("employee mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn by_department(&self, department: &str) -> Result<Vec<Employee>, StoreError> {
        let mut employees = self.list()?;
        employees.retain(|employee| employee.department == department);
        Ok(employees)
    }

    fn by_risk_level(&self, risk_level: RiskLevel) -> Result<Vec<Employee>, StoreError> {
        let mut employees = self.list()?;
        employees.retain(|employee| employee.risk_level == risk_level);
        Ok(employees)
    }
}

/// Suggestion collection held in process memory. Identifiers are
/// assigned on insert, mirroring the hosted store's behavior.
#[derive(Default)]
pub(crate) struct InMemorySuggestionStore {
    records: Mutex<HashMap<SuggestionId, Suggestion>>,
    sequence: AtomicU64,
}

impl InMemorySuggestionStore {
    pub(crate) fn with_suggestions(suggestions: Vec<Suggestion>) -> Self {
        let sequence = AtomicU64::new(suggestions.len() as u64 + 1);
        let records = suggestions
            .into_iter()
            .map(|suggestion| (suggestion.id.clone(), suggestion))
            .collect();
        Self {
            records: Mutex::new(records),
            sequence,
        }
    }

    fn next_id(&self) -> SuggestionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        SuggestionId(format!("sug-{id:04}"))
    }
}

impl SuggestionStore for InMemorySuggestionStore {
    fn list(&self) -> Result<Vec<Suggestion>, StoreError> {
        let guard = self.records.lock().expect("suggestion mutex poisoned");
        let mut suggestions: Vec<Suggestion> = guard.values().cloned().collect();
        suggestions.sort_by(|a, b| b.date_updated.cmp(&a.date_updated));
        Ok(suggestions)
    }

    fn get(&self, id: &SuggestionId) -> Result<Option<Suggestion>, StoreError> {
        let guard = self.records.lock().expect("suggestion mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn by_employee(&self, employee_id: &EmployeeId) -> Result<Vec<Suggestion>, StoreError> {
        let mut suggestions = self.list()?;
        suggestions.retain(|suggestion| suggestion.employee_id == *employee_id);
        Ok(suggestions)
    }

    fn by_status(&self, status: SuggestionStatus) -> Result<Vec<Suggestion>, StoreError> {
        let mut suggestions = self.list()?;
        suggestions.retain(|suggestion| suggestion.status == status);
        Ok(suggestions)
    }

    fn insert(&self, mut suggestion: Suggestion) -> Result<Suggestion, StoreError> {
        if suggestion.id.0.is_empty() {
            suggestion.id = self.next_id();
        }
        let mut guard = self.records.lock().expect("suggestion mutex poisoned");
        guard.insert(suggestion.id.clone(), suggestion.clone());
        Ok(suggestion)
    }

    fn update(&self, suggestion: Suggestion) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("suggestion mutex poisoned");
        if guard.contains_key(&suggestion.id) {
            guard.insert(suggestion.id.clone(), suggestion);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn delete(&self, id: &SuggestionId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("suggestion mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid seed timestamp")
}

fn employee(
    id: &str,
    name: &str,
    department: &str,
    job_title: &str,
    workstation: &str,
    risk_level: RiskLevel,
    last_assessment: DateTime<Utc>,
) -> Employee {
    Employee {
        id: EmployeeId(id.to_string()),
        name: name.to_string(),
        department: department.to_string(),
        job_title: job_title.to_string(),
        workstation: workstation.to_string(),
        risk_level,
        last_assessment,
    }
}

pub(crate) fn seed_employees() -> Vec<Employee> {
    vec![
        employee(
            "emp-001",
            "Sarah Johnson",
            "IT",
            "Software Developer",
            "Desk-001",
            RiskLevel::High,
            ts(2024, 1, 15, 10, 30),
        ),
        employee(
            "emp-002",
            "Michael Chen",
            "Finance",
            "Financial Analyst",
            "Desk-002",
            RiskLevel::Medium,
            ts(2024, 1, 20, 14, 15),
        ),
        employee(
            "emp-003",
            "Emma Wilson",
            "HR",
            "HR Manager",
            "Desk-003",
            RiskLevel::Low,
            ts(2024, 1, 10, 9, 0),
        ),
        employee(
            "emp-004",
            "David Brown",
            "Operations",
            "Operations Manager",
            "Desk-004",
            RiskLevel::High,
            ts(2024, 1, 25, 11, 45),
        ),
        employee(
            "emp-005",
            "Lisa Garcia",
            "Marketing",
            "Marketing Specialist",
            "Desk-005",
            RiskLevel::Medium,
            ts(2024, 1, 18, 16, 20),
        ),
    ]
}

pub(crate) fn seed_suggestions(employees: &[Employee]) -> Vec<Suggestion> {
    let employee_id = |index: usize| employees[index % employees.len()].id.clone();

    vec![
        Suggestion {
            id: SuggestionId("sug-0001".to_string()),
            employee_id: employee_id(0),
            kind: SuggestionType::Exercise,
            description: "Take regular breaks every 30 minutes to stretch and walk around"
                .to_string(),
            status: SuggestionStatus::Pending,
            priority: SuggestionPriority::High,
            source: SuggestionSource::Vida,
            created_by: "vida-system".to_string(),
            date_created: ts(2024, 1, 15, 10, 30),
            date_updated: ts(2024, 1, 15, 10, 30),
            date_completed: None,
            notes: Some("Recommended by VIDA assessment".to_string()),
            estimated_cost: None,
        },
        Suggestion {
            id: SuggestionId("sug-0002".to_string()),
            employee_id: employee_id(1),
            kind: SuggestionType::Equipment,
            description: "Adjust monitor height to eye level to reduce neck strain".to_string(),
            status: SuggestionStatus::InProgress,
            priority: SuggestionPriority::Medium,
            source: SuggestionSource::Vida,
            created_by: "vida-system".to_string(),
            date_created: ts(2024, 1, 20, 14, 15),
            date_updated: ts(2024, 1, 22, 9, 30),
            date_completed: None,
            notes: Some("Equipment ordered, awaiting delivery".to_string()),
            estimated_cost: None,
        },
        Suggestion {
            id: SuggestionId("sug-0003".to_string()),
            employee_id: employee_id(2),
            kind: SuggestionType::Behavioural,
            description: "Practice proper lifting techniques when moving office supplies"
                .to_string(),
            status: SuggestionStatus::Completed,
            priority: SuggestionPriority::Low,
            source: SuggestionSource::Admin,
            created_by: "hsmanager@company.com".to_string(),
            date_created: ts(2024, 1, 10, 9, 0),
            date_updated: ts(2024, 1, 12, 15, 45),
            date_completed: Some(ts(2024, 1, 12, 15, 45)),
            notes: Some("Training completed successfully".to_string()),
            estimated_cost: None,
        },
        Suggestion {
            id: SuggestionId("sug-0004".to_string()),
            employee_id: employee_id(3),
            kind: SuggestionType::Lifestyle,
            description: "Incorporate desk exercises into daily routine".to_string(),
            status: SuggestionStatus::Pending,
            priority: SuggestionPriority::Medium,
            source: SuggestionSource::Admin,
            created_by: "hsmanager@company.com".to_string(),
            date_created: ts(2024, 1, 25, 11, 45),
            date_updated: ts(2024, 1, 25, 11, 45),
            date_completed: None,
            notes: None,
            estimated_cost: Some("£0.00".to_string()),
        },
        Suggestion {
            id: SuggestionId("sug-0005".to_string()),
            employee_id: employee_id(4),
            kind: SuggestionType::Equipment,
            description: "Install ergonomic keyboard and mouse for better wrist support"
                .to_string(),
            status: SuggestionStatus::Dismissed,
            priority: SuggestionPriority::Low,
            source: SuggestionSource::Vida,
            created_by: "vida-system".to_string(),
            date_created: ts(2024, 1, 18, 16, 20),
            date_updated: ts(2024, 1, 20, 10, 15),
            date_completed: None,
            notes: Some("Not applicable for current workstation setup".to_string()),
            estimated_cost: None,
        },
    ]
}

pub(crate) fn seeded_stores() -> (Arc<InMemoryEmployeeStore>, Arc<InMemorySuggestionStore>) {
    let employees = seed_employees();
    let suggestions = seed_suggestions(&employees);
    (
        Arc::new(InMemoryEmployeeStore::with_employees(employees)),
        Arc::new(InMemorySuggestionStore::with_suggestions(suggestions)),
    )
}
