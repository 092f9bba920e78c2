use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use civic_report::complaints::{
    AuthPayload, Complaint, ComplaintId, ComplaintOrdering, ComplaintRepository, NewComplaint,
    RepositoryError, RetrievalScope, Role, TokenVerifier, User, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory storage adapter. Ids come from a monotonic sequence; ties under
/// priority ordering keep insertion order, which is this store's natural
/// order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryComplaintRepository {
    complaints: Arc<Mutex<Vec<Complaint>>>,
    users: Arc<Mutex<HashMap<UserId, User>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryComplaintRepository {
    pub(crate) fn insert_user(&self, user: User) {
        let mut guard = self.users.lock().expect("users mutex poisoned");
        guard.insert(user.id.clone(), user);
    }
}

impl ComplaintRepository for InMemoryComplaintRepository {
    fn create(&self, complaint: NewComplaint) -> Result<Complaint, RepositoryError> {
        let citizen = self
            .users
            .lock()
            .expect("users mutex poisoned")
            .get(&complaint.citizen_id)
            .map(User::contact)
            .ok_or(RepositoryError::NotFound)?;

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let stored = Complaint {
            id: ComplaintId(format!("cmp-{:06}", sequence + 1)),
            title: complaint.title,
            description: complaint.description,
            location: complaint.location,
            photo_url: complaint.photo_url,
            category: complaint.category,
            priority: complaint.priority,
            citizen_id: complaint.citizen_id,
            created_at: Utc::now(),
            citizen,
        };

        self.complaints
            .lock()
            .expect("complaints mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    fn list(&self, scope: &RetrievalScope) -> Result<Vec<Complaint>, RepositoryError> {
        let guard = self.complaints.lock().expect("complaints mutex poisoned");
        let mut results: Vec<Complaint> = guard
            .iter()
            .filter(|complaint| match scope {
                RetrievalScope::Admin => true,
                RetrievalScope::OwnedBy(owner) => &complaint.citizen_id == owner,
            })
            .cloned()
            .collect();

        match scope.ordering() {
            ComplaintOrdering::PriorityDesc => {
                results.sort_by(|a, b| b.priority.cmp(&a.priority));
            }
            ComplaintOrdering::CreatedAtDesc => {
                results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
        }

        Ok(results)
    }

    fn find_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .expect("users mutex poisoned")
            .get(id)
            .cloned())
    }
}

/// Session-table verifier standing in for the token-issuing collaborator.
#[derive(Default, Clone)]
pub(crate) struct StaticTokenVerifier {
    sessions: Arc<Mutex<HashMap<String, UserId>>>,
}

impl StaticTokenVerifier {
    pub(crate) fn register(&self, token: impl Into<String>, user_id: UserId) {
        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(token.into(), user_id);
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Option<AuthPayload> {
        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.get(token).map(|user_id| AuthPayload {
            user_id: user_id.clone(),
        })
    }
}

/// Seed one citizen and one admin with fixed session tokens so the HTTP
/// surface can be exercised immediately outside production.
pub(crate) fn seed_demo_identities(
    repository: &InMemoryComplaintRepository,
    sessions: &StaticTokenVerifier,
) {
    let citizen = User {
        id: UserId("usr-000001".to_string()),
        name: "Jordan Rivera".to_string(),
        email: "jordan.rivera@example.com".to_string(),
        role: Role::Citizen,
    };
    let admin = User {
        id: UserId("usr-000900".to_string()),
        name: "Dana Whitfield".to_string(),
        email: "dana.whitfield@example.gov".to_string(),
        role: Role::Admin,
    };

    sessions.register("citizen-demo-token", citizen.id.clone());
    sessions.register("admin-demo-token", admin.id.clone());
    repository.insert_user(citizen);
    repository.insert_user(admin);
}
