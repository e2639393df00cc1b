//! Mock authentication and permission checks for the admin dashboard.
//!
//! Sign-in accepts any password and resolves the admin against a fixed
//! roster. The session lives in a single injected storage slot (the
//! browser-local-storage analogue) and expires lazily on read; there is
//! no background timer. "Not signed in" and "unknown email" are modeled
//! as `None`, never as errors.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::clock::Clock;

/// Default session validity window.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Actions an admin can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CreateSuggestions,
    UpdateStatus,
    ViewAll,
}

/// Signed-in principal exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub email: String,
    pub name: String,
    pub role: String,
    pub permissions: Vec<Permission>,
}

impl AdminUser {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Session payload as persisted: the user plus the issue timestamp the
/// expiry check runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: AdminUser,
    pub issued_at: DateTime<Utc>,
}

/// Single-slot persistence for the current session, injected so tests
/// can substitute a fake and the service never reaches for ambient
/// globals.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<StoredSession>;
    fn save(&self, session: StoredSession);
    fn clear(&self);
}

/// Process-local session slot used by the API service and tests.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slot: Mutex<Option<StoredSession>>,
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Option<StoredSession> {
        self.slot.lock().expect("session mutex poisoned").clone()
    }

    fn save(&self, session: StoredSession) {
        *self.slot.lock().expect("session mutex poisoned") = Some(session);
    }

    fn clear(&self) {
        *self.slot.lock().expect("session mutex poisoned") = None;
    }
}

/// Fixed roster of dashboard admins. A real deployment would source this
/// from the document store; the dashboard ships with a mock directory.
#[derive(Debug, Clone)]
pub struct AdminDirectory {
    admins: Vec<AdminUser>,
}

impl AdminDirectory {
    pub fn standard() -> Self {
        let full = vec![
            Permission::CreateSuggestions,
            Permission::UpdateStatus,
            Permission::ViewAll,
        ];
        Self {
            admins: vec![
                AdminUser {
                    email: "hsmanager@company.com".to_string(),
                    name: "Alex Thompson".to_string(),
                    role: "Health & Safety Manager".to_string(),
                    permissions: full.clone(),
                },
                AdminUser {
                    email: "admin@company.com".to_string(),
                    name: "Admin User".to_string(),
                    role: "Administrator".to_string(),
                    permissions: full,
                },
                AdminUser {
                    email: "viewer@company.com".to_string(),
                    name: "Viewer User".to_string(),
                    role: "Viewer".to_string(),
                    permissions: vec![Permission::ViewAll],
                },
            ],
        }
    }

    pub fn find_by_email(&self, email: &str) -> Option<&AdminUser> {
        self.admins.iter().find(|admin| admin.email == email)
    }
}

/// Mock session service gating the dashboard's mutating actions.
pub struct SessionService<S, C> {
    directory: AdminDirectory,
    store: S,
    clock: C,
    ttl: Duration,
}

impl<S, C> SessionService<S, C>
where
    S: SessionStore,
    C: Clock,
{
    pub fn new(directory: AdminDirectory, store: S, clock: C) -> Self {
        Self::with_ttl_hours(directory, store, clock, DEFAULT_SESSION_TTL_HOURS)
    }

    pub fn with_ttl_hours(directory: AdminDirectory, store: S, clock: C, ttl_hours: i64) -> Self {
        Self {
            directory,
            store,
            clock,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Mock sign-in: any password is accepted, only the email is checked
    /// against the roster. `None` signals invalid credentials.
    pub fn sign_in(&self, email: &str, _password: &str) -> Option<AdminUser> {
        let admin = self.directory.find_by_email(email)?.clone();
        self.store.save(StoredSession {
            user: admin.clone(),
            issued_at: self.clock.now(),
        });
        info!(email = %admin.email, role = %admin.role, "admin signed in");
        Some(admin)
    }

    /// Read the current admin, expiring the stored session when its age
    /// exceeds the validity window.
    pub fn current_admin(&self) -> Option<AdminUser> {
        let session = self.store.load()?;
        let age = self.clock.now().signed_duration_since(session.issued_at);
        if age > self.ttl {
            debug!(email = %session.user.email, "session expired, clearing");
            self.store.clear();
            return None;
        }
        Some(session.user)
    }

    /// Unconditionally drop the session; safe to call repeatedly.
    pub fn sign_out(&self) {
        self.store.clear();
    }

    /// True iff a non-expired admin holds `permission`. Never errors.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.current_admin()
            .map(|admin| admin.has_permission(permission))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct FakeClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl FakeClock {
        fn advance(&self, duration: Duration) {
            let mut guard = self.now.lock().expect("clock mutex poisoned");
            *guard += duration;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock mutex poisoned")
        }
    }

    fn service() -> (SessionService<InMemorySessionStore, FakeClock>, FakeClock) {
        let clock = FakeClock::default();
        let service = SessionService::new(
            AdminDirectory::standard(),
            InMemorySessionStore::default(),
            clock.clone(),
        );
        (service, clock)
    }

    #[test]
    fn sign_in_resolves_roster_admins_regardless_of_password() {
        let (service, _) = service();
        let admin = service
            .sign_in("admin@company.com", "anything")
            .expect("roster admin signs in");
        assert_eq!(admin.name, "Admin User");
        assert_eq!(service.current_admin(), Some(admin));
    }

    #[test]
    fn unknown_email_yields_none_and_no_session() {
        let (service, _) = service();
        assert!(service.sign_in("nobody@x.com", "pw").is_none());
        assert!(service.current_admin().is_none());
    }

    #[test]
    fn sign_out_clears_the_session_idempotently() {
        let (service, _) = service();
        service.sign_in("admin@company.com", "pw");
        service.sign_out();
        assert!(service.current_admin().is_none());
        service.sign_out();
        assert!(service.current_admin().is_none());
    }

    #[test]
    fn session_expires_lazily_after_the_validity_window() {
        let (service, clock) = service();
        service.sign_in("admin@company.com", "pw");

        clock.advance(Duration::hours(24));
        assert!(service.current_admin().is_some());

        clock.advance(Duration::milliseconds(1));
        assert!(service.current_admin().is_none());
        // The expired slot is deleted, not just hidden.
        assert!(!service.has_permission(Permission::ViewAll));
    }

    #[test]
    fn permissions_reflect_the_roster_entry() {
        let (service, _) = service();
        service.sign_in("viewer@company.com", "pw");
        assert!(service.has_permission(Permission::ViewAll));
        assert!(!service.has_permission(Permission::CreateSuggestions));
        assert!(!service.has_permission(Permission::UpdateStatus));
    }

    #[test]
    fn permission_check_without_a_session_is_false() {
        let (service, _) = service();
        assert!(!service.has_permission(Permission::ViewAll));
    }
}
