use crate::infra::{seeded_stores, InMemoryEmployeeStore, InMemorySuggestionStore};
use clap::Args;
use msk_advisor::auth::{AdminDirectory, InMemorySessionStore, Permission, SessionService};
use msk_advisor::clock::SystemClock;
use msk_advisor::dashboard::{
    DashboardService, EmployeeRosterImporter, NewSuggestion, SortDirection, SortField,
    SuggestionFilters, SuggestionPriority, SuggestionStatus, SuggestionType, SuggestionUpdate,
};
use msk_advisor::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct SummaryArgs {
    /// Seed the employee collection from a CSV roster export
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the permission-gating portion of the demo
    #[arg(long)]
    pub(crate) skip_permissions: bool,
}

fn build_service(
    roster: Option<PathBuf>,
) -> Result<DashboardService<InMemoryEmployeeStore, InMemorySuggestionStore, SystemClock>, AppError>
{
    let (employees, suggestions) = match roster {
        Some(path) => {
            let imported = EmployeeRosterImporter::from_path(path)?;
            (
                Arc::new(InMemoryEmployeeStore::with_employees(imported)),
                Arc::new(InMemorySuggestionStore::default()),
            )
        }
        None => seeded_stores(),
    };
    Ok(DashboardService::new(employees, suggestions, SystemClock))
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let service = build_service(args.roster)?;
    let summary = match service.summary() {
        Ok(summary) => summary,
        Err(err) => {
            println!("Summary unavailable: {}", err);
            return Ok(());
        }
    };

    println!("MSK suggestion dashboard summary");
    println!(
        "- {} suggestions tracked | {} overdue | {}% completed",
        summary.total_suggestions, summary.overdue, summary.completion_rate_pct
    );
    println!("- {} employees at high MSK risk", summary.high_risk_employees);
    println!("By status:");
    for entry in &summary.status_counts {
        println!("  - {}: {}", entry.status_label, entry.count);
    }
    println!("By priority:");
    for entry in &summary.priority_counts {
        println!("  - {}: {}", entry.priority_label, entry.count);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = build_service(None)?;
    let sessions = SessionService::new(
        AdminDirectory::standard(),
        InMemorySessionStore::default(),
        SystemClock,
    );

    println!("Suggestion dashboard demo");

    let admin = match sessions.sign_in("hsmanager@company.com", "demo") {
        Some(admin) => admin,
        None => {
            println!("  Sign-in rejected for roster admin");
            return Ok(());
        }
    };
    println!("- Signed in as {} ({})", admin.name, admin.role);

    let employees = match service.employees() {
        Ok(employees) => employees,
        Err(err) => {
            println!("  Employee roster unavailable: {}", err);
            return Ok(());
        }
    };
    println!("- {} employees on the roster", employees.len());

    let Some(first) = employees.first() else {
        println!("  Roster is empty; nothing to demonstrate");
        return Ok(());
    };

    let created = match service.create_suggestion(
        NewSuggestion {
            employee_id: first.id.clone(),
            kind: SuggestionType::Equipment,
            description: "Provide a sit-stand desk converter".to_string(),
            priority: SuggestionPriority::High,
            notes: None,
            estimated_cost: Some("£180".to_string()),
        },
        &admin.email,
    ) {
        Ok(created) => created,
        Err(err) => {
            println!("  Creation failed: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Created suggestion {} for {} (status {})",
        created.id.0,
        first.name,
        created.status.label()
    );

    let completed = match service.update_suggestion(
        &created.id,
        SuggestionUpdate {
            status: Some(SuggestionStatus::Completed),
            notes: Some("Desk converter installed".to_string()),
            ..Default::default()
        },
    ) {
        Ok(updated) => updated,
        Err(err) => {
            println!("  Update failed: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Marked {} completed at {}",
        completed.id.0,
        completed
            .date_completed
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string())
    );

    let filters = SuggestionFilters {
        status: Some(SuggestionStatus::Pending),
        ..Default::default()
    };
    match service.suggestions(&filters, SortField::Priority, SortDirection::Desc) {
        Ok(pending) => {
            println!("- {} pending suggestions by priority:", pending.len());
            for view in pending {
                println!(
                    "  - [{}] {}: {}",
                    view.suggestion.priority.label(),
                    view.employee_name,
                    view.suggestion.description
                );
            }
        }
        Err(err) => println!("  Listing unavailable: {}", err),
    }

    if args.skip_permissions {
        return Ok(());
    }

    println!("\nPermission gating");
    sessions.sign_out();
    let viewer_sessions = SessionService::new(
        AdminDirectory::standard(),
        InMemorySessionStore::default(),
        SystemClock,
    );
    if viewer_sessions.sign_in("viewer@company.com", "demo").is_some() {
        println!(
            "- viewer@company.com can view all: {}",
            viewer_sessions.has_permission(Permission::ViewAll)
        );
        println!(
            "- viewer@company.com can create suggestions: {}",
            viewer_sessions.has_permission(Permission::CreateSuggestions)
        );
    }

    Ok(())
}
