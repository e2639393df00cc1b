//! CSV import for the employee roster, used to seed the in-memory store
//! from an HR export.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use super::domain::{Employee, EmployeeId, RiskLevel};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRiskLevel { row: usize, value: String },
    InvalidTimestamp { row: usize, value: String },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidRiskLevel { row, value } => {
                write!(f, "row {}: unknown risk level '{}'", row, value)
            }
            RosterImportError::InvalidTimestamp { row, value } => {
                write!(f, "row {}: unparseable assessment timestamp '{}'", row, value)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidRiskLevel { .. }
            | RosterImportError::InvalidTimestamp { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Job Title")]
    job_title: String,
    #[serde(rename = "Workstation")]
    workstation: String,
    #[serde(rename = "Risk Level")]
    risk_level: String,
    #[serde(rename = "Last Assessment")]
    last_assessment: String,
}

pub struct EmployeeRosterImporter;

impl EmployeeRosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Employee>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Employee>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut employees = Vec::new();
        for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = record?;
            // First data row is row 2 of the file (after the header).
            let row_number = index + 2;

            let risk_level = parse_risk_level(&row.risk_level).ok_or_else(|| {
                RosterImportError::InvalidRiskLevel {
                    row: row_number,
                    value: row.risk_level.clone(),
                }
            })?;
            let last_assessment = parse_timestamp(&row.last_assessment).ok_or_else(|| {
                RosterImportError::InvalidTimestamp {
                    row: row_number,
                    value: row.last_assessment.clone(),
                }
            })?;

            employees.push(Employee {
                id: EmployeeId(format!("emp-{:03}", index + 1)),
                name: row.name,
                department: row.department,
                job_title: row.job_title,
                workstation: row.workstation,
                risk_level,
                last_assessment,
            });
        }

        Ok(employees)
    }
}

fn parse_risk_level(value: &str) -> Option<RiskLevel> {
    match value.trim().to_ascii_lowercase().as_str() {
        "low" => Some(RiskLevel::Low),
        "medium" => Some(RiskLevel::Medium),
        "high" => Some(RiskLevel::High),
        _ => None,
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
    }

    None
}
