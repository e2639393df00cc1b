use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    EmployeeId, NewSuggestion, RiskLevel, SuggestionId, SuggestionPriority, SuggestionSource,
    SuggestionStatus, SuggestionType, SuggestionUpdate,
};
use super::filter::SuggestionFilters;
use super::service::{DashboardService, ServiceError};
use super::sort::{SortDirection, SortField};
use super::store::{EmployeeStore, SuggestionStore};
use crate::auth::{AdminUser, Permission, SessionService, SessionStore};
use crate::clock::Clock;

/// Shared state handed to every dashboard endpoint: the data service
/// plus the session service gating mutating actions.
pub struct DashboardContext<E, S, K, C> {
    pub service: DashboardService<E, S, C>,
    pub sessions: SessionService<K, C>,
}

/// Router builder exposing the dashboard HTTP surface.
pub fn dashboard_router<E, S, K, C>(context: Arc<DashboardContext<E, S, K, C>>) -> Router
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/auth/login", post(login_handler::<E, S, K, C>))
        .route("/api/v1/auth/logout", post(logout_handler::<E, S, K, C>))
        .route("/api/v1/auth/me", get(me_handler::<E, S, K, C>))
        .route("/api/v1/employees", get(list_employees_handler::<E, S, K, C>))
        .route(
            "/api/v1/employees/:employee_id",
            get(get_employee_handler::<E, S, K, C>),
        )
        .route(
            "/api/v1/employees/:employee_id/suggestions",
            get(employee_suggestions_handler::<E, S, K, C>),
        )
        .route(
            "/api/v1/suggestions",
            get(list_suggestions_handler::<E, S, K, C>)
                .post(create_suggestion_handler::<E, S, K, C>),
        )
        .route(
            "/api/v1/suggestions/:suggestion_id",
            get(get_suggestion_handler::<E, S, K, C>)
                .patch(update_suggestion_handler::<E, S, K, C>)
                .delete(delete_suggestion_handler::<E, S, K, C>),
        )
        .route(
            "/api/v1/dashboard/summary",
            get(summary_handler::<E, S, K, C>),
        )
        .with_state(context)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EmployeeQuery {
    #[serde(default)]
    pub(crate) department: Option<String>,
    #[serde(default)]
    pub(crate) risk_level: Option<RiskLevel>,
}

/// Query string for the suggestion table: the optional filter fields
/// plus sort controls, defaulting to newest-updated first.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SuggestionQuery {
    #[serde(default)]
    pub(crate) employee: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<SuggestionType>,
    #[serde(default)]
    pub(crate) status: Option<SuggestionStatus>,
    #[serde(default)]
    pub(crate) source: Option<SuggestionSource>,
    #[serde(default)]
    pub(crate) priority: Option<SuggestionPriority>,
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) sort: Option<SortField>,
    #[serde(default)]
    pub(crate) direction: Option<SortDirection>,
}

impl SuggestionQuery {
    fn filters(&self) -> SuggestionFilters {
        SuggestionFilters {
            employee: self.employee.clone().map(EmployeeId),
            category: self.category,
            status: self.status,
            source: self.source,
            priority: self.priority,
            search: self.search.clone(),
        }
    }
}

async fn login_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
    axum::Json(payload): axum::Json<LoginRequest>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    match context.sessions.sign_in(&payload.email, &payload.password) {
        Some(admin) => (StatusCode::OK, axum::Json(admin)).into_response(),
        None => {
            let payload = json!({ "error": "invalid credentials" });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
    }
}

async fn logout_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
) -> StatusCode
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    context.sessions.sign_out();
    StatusCode::NO_CONTENT
}

async fn me_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    match context.sessions.current_admin() {
        Some(admin) => (StatusCode::OK, axum::Json(admin)).into_response(),
        None => {
            let payload = json!({ "error": "not signed in" });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
    }
}

async fn list_employees_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
    Query(query): Query<EmployeeQuery>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    let result = match (query.department.as_deref(), query.risk_level) {
        (Some(department), _) => context.service.employees_by_department(department),
        (None, Some(risk_level)) => context.service.employees_by_risk_level(risk_level),
        (None, None) => context.service.employees(),
    };

    match result {
        Ok(employees) => (StatusCode::OK, axum::Json(employees)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_employee_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    match context.service.employee(&EmployeeId(employee_id)) {
        Ok(Some(employee)) => (StatusCode::OK, axum::Json(employee)).into_response(),
        Ok(None) => not_found("employee not found"),
        Err(err) => internal_error(err),
    }
}

async fn employee_suggestions_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    match context
        .service
        .suggestions_for_employee(&EmployeeId(employee_id))
    {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn list_suggestions_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
    Query(query): Query<SuggestionQuery>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    let field = query.sort.unwrap_or(SortField::DateUpdated);
    let direction = query.direction.unwrap_or(SortDirection::Desc);

    match context.service.suggestions(&query.filters(), field, direction) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_suggestion_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
    Path(suggestion_id): Path<String>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    match context.service.suggestion(&SuggestionId(suggestion_id)) {
        Ok(Some(view)) => (StatusCode::OK, axum::Json(view)).into_response(),
        Ok(None) => not_found("suggestion not found"),
        Err(err) => internal_error(err),
    }
}

async fn create_suggestion_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
    axum::Json(payload): axum::Json<NewSuggestion>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    let admin = match require_permission(&context.sessions, Permission::CreateSuggestions) {
        Ok(admin) => admin,
        Err(response) => return response,
    };

    match context.service.create_suggestion(payload, &admin.email) {
        Ok(suggestion) => (StatusCode::CREATED, axum::Json(suggestion)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn update_suggestion_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
    Path(suggestion_id): Path<String>,
    axum::Json(payload): axum::Json<SuggestionUpdate>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    if let Err(response) = require_permission(&context.sessions, Permission::UpdateStatus) {
        return response;
    }

    match context
        .service
        .update_suggestion(&SuggestionId(suggestion_id), payload)
    {
        Ok(suggestion) => (StatusCode::OK, axum::Json(suggestion)).into_response(),
        Err(ServiceError::SuggestionNotFound) => not_found("suggestion not found"),
        Err(err) => internal_error(err),
    }
}

async fn delete_suggestion_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
    Path(suggestion_id): Path<String>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    if let Err(response) = require_permission(&context.sessions, Permission::UpdateStatus) {
        return response;
    }

    match context.service.delete_suggestion(&SuggestionId(suggestion_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ServiceError::SuggestionNotFound) => not_found("suggestion not found"),
        Err(err) => internal_error(err),
    }
}

async fn summary_handler<E, S, K, C>(
    State(context): State<Arc<DashboardContext<E, S, K, C>>>,
) -> Response
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    match context.service.summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => internal_error(err),
    }
}

fn require_permission<K, C>(
    sessions: &SessionService<K, C>,
    permission: Permission,
) -> Result<AdminUser, Response>
where
    K: SessionStore,
    C: Clock,
{
    let Some(admin) = sessions.current_admin() else {
        let payload = json!({ "error": "not signed in" });
        return Err((StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response());
    };
    if !admin.has_permission(permission) {
        let payload = json!({ "error": "permission denied" });
        return Err((StatusCode::FORBIDDEN, axum::Json(payload)).into_response());
    }
    Ok(admin)
}

fn not_found(message: &str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(err: ServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
