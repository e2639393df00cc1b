use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use msk_advisor::auth::SessionStore;
use msk_advisor::clock::Clock;
use msk_advisor::dashboard::{dashboard_router, DashboardContext, EmployeeStore, SuggestionStore};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_dashboard_routes<E, S, K, C>(
    context: Arc<DashboardContext<E, S, K, C>>,
) -> axum::Router
where
    E: EmployeeStore + 'static,
    S: SuggestionStore + 'static,
    K: SessionStore + 'static,
    C: Clock + 'static,
{
    dashboard_router(context)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::seeded_stores;
    use axum::body::Body;
    use axum::http::Request;
    use msk_advisor::auth::{AdminDirectory, InMemorySessionStore, SessionService};
    use msk_advisor::clock::SystemClock;
    use msk_advisor::dashboard::DashboardService;
    use tower::ServiceExt;

    fn test_router() -> axum::Router {
        let (employees, suggestions) = seeded_stores();
        let context = Arc::new(DashboardContext {
            service: DashboardService::new(employees, suggestions, SystemClock),
            sessions: SessionService::new(
                AdminDirectory::standard(),
                InMemorySessionStore::default(),
                SystemClock,
            ),
        });
        dashboard_router(context)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn suggestion_listing_is_open_and_seeded() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/suggestions?status=pending")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn mutation_without_session_is_unauthorized() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/api/v1/suggestions/sug-0001")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"status":"completed"}"#))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_rejects_unknown_emails() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"email":"nobody@x.com","password":"pw"}"#))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
