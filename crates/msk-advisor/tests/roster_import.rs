//! End-to-end roster import from a CSV file on disk.

use std::fs;
use std::path::PathBuf;

use msk_advisor::dashboard::{EmployeeRosterImporter, RiskLevel, RosterImportError};

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("msk-roster-{name}-{}.csv", std::process::id()));
    fs::write(&path, contents).expect("fixture written");
    path
}

#[test]
fn imports_an_hr_export_from_disk() {
    let path = write_fixture(
        "ok",
        "Name,Department,Job Title,Workstation,Risk Level,Last Assessment\n\
         Sarah Johnson,IT,Software Developer,Desk-001,high,2024-01-15T10:30:00Z\n\
         Michael Chen , Finance , Accountant , Desk-002 , Medium , 2024-01-12\n",
    );

    let employees = EmployeeRosterImporter::from_path(&path).expect("import succeeds");
    fs::remove_file(&path).ok();

    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].id.0, "emp-001");
    assert_eq!(employees[0].name, "Sarah Johnson");
    // Whitespace around cells comes straight from hand-edited exports.
    assert_eq!(employees[1].name, "Michael Chen");
    assert_eq!(employees[1].department, "Finance");
    assert_eq!(employees[1].risk_level, RiskLevel::Medium);
}

#[test]
fn missing_files_surface_as_io_errors() {
    let path = std::env::temp_dir().join("msk-roster-does-not-exist.csv");
    match EmployeeRosterImporter::from_path(&path) {
        Err(RosterImportError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}
