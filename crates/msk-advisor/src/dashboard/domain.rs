use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for employee records. Values are assigned by the
/// backing document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for suggestion records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuggestionId(pub String);

/// Musculoskeletal risk classification from the latest workstation
/// assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Employee roster entry. Immutable from the dashboard's point of view;
/// updates arrive through external assessment flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub job_title: String,
    pub workstation: String,
    pub risk_level: RiskLevel,
    pub last_assessment: DateTime<Utc>,
}

/// Advisory categories a suggestion can fall under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    Exercise,
    Equipment,
    Behavioural,
    Lifestyle,
}

impl SuggestionType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Equipment => "equipment",
            Self::Behavioural => "behavioural",
            Self::Lifestyle => "lifestyle",
        }
    }
}

/// Lifecycle state of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    Pending,
    InProgress,
    Completed,
    Dismissed,
}

impl SuggestionStatus {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Pending,
            Self::InProgress,
            Self::Completed,
            Self::Dismissed,
        ]
    }

    /// Explicit rank table used for sorting; kept as a constant map
    /// rather than inferred from declaration order.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::InProgress => 2,
            Self::Completed => 3,
            Self::Dismissed => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Dismissed => "dismissed",
        }
    }
}

/// Urgency attached to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    Low,
    Medium,
    High,
}

impl SuggestionPriority {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    /// Explicit rank table: high outranks medium outranks low.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Where a suggestion originated: the VIDA assessment system or an admin
/// entering it by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Vida,
    Admin,
}

impl SuggestionSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vida => "vida",
            Self::Admin => "admin",
        }
    }
}

/// Advisory record tied to an employee.
///
/// `estimated_cost` is deliberately an opaque display string: historical
/// data reuses the field for free text, so formatting tolerates values
/// that do not parse as money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub employee_id: EmployeeId,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub description: String,
    pub status: SuggestionStatus,
    pub priority: SuggestionPriority,
    pub source: SuggestionSource,
    pub created_by: String,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_completed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,
}

/// Payload for creating a suggestion through the dashboard. Status,
/// source, and timestamps are filled in by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSuggestion {
    pub employee_id: EmployeeId,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub description: String,
    pub priority: SuggestionPriority,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<String>,
}

/// Partial update applied to an existing suggestion. Absent fields leave
/// the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionUpdate {
    #[serde(default)]
    pub status: Option<SuggestionStatus>,
    #[serde(default)]
    pub priority: Option<SuggestionPriority>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<String>,
}
