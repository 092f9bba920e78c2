use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::complaints::auth::{AuthPayload, TokenVerifier};
use crate::complaints::domain::{
    Complaint, ComplaintId, ComplaintOrdering, ComplaintSubmission, NewComplaint, RetrievalScope,
    Role, User, UserId,
};
use crate::complaints::repository::{ComplaintRepository, RepositoryError};
use crate::complaints::scoring::{CompletionClient, CompletionError, PriorityScorer};
use crate::complaints::service::ComplaintService;

pub(super) const CITIZEN_A_TOKEN: &str = "citizen-a-token";
pub(super) const CITIZEN_B_TOKEN: &str = "citizen-b-token";
pub(super) const ADMIN_TOKEN: &str = "admin-token";
pub(super) const ORPHAN_TOKEN: &str = "orphan-token";

pub(super) fn citizen_a() -> User {
    User {
        id: UserId("usr-001".to_string()),
        name: "Amara Okafor".to_string(),
        email: "amara.okafor@example.com".to_string(),
        role: Role::Citizen,
    }
}

pub(super) fn citizen_b() -> User {
    User {
        id: UserId("usr-002".to_string()),
        name: "Luis Mendes".to_string(),
        email: "luis.mendes@example.com".to_string(),
        role: Role::Citizen,
    }
}

pub(super) fn admin() -> User {
    User {
        id: UserId("usr-900".to_string()),
        name: "Priya Nair".to_string(),
        email: "priya.nair@example.com".to_string(),
        role: Role::Admin,
    }
}

pub(super) fn pothole_submission() -> ComplaintSubmission {
    ComplaintSubmission {
        title: "Large pothole blocking lane".to_string(),
        description: "Deep pothole on Main St causing traffic hazard".to_string(),
        location: Some("Main St & 3rd Ave".to_string()),
        photo_url: None,
    }
}

/// In-memory storage double. Ids are sequence-assigned and timestamps derive
/// from the sequence so recency ordering is deterministic in tests.
#[derive(Default)]
pub(super) struct MemoryRepository {
    complaints: Mutex<Vec<Complaint>>,
    users: Mutex<HashMap<UserId, User>>,
    sequence: AtomicU64,
}

impl MemoryRepository {
    pub(super) fn with_users(users: &[User]) -> Arc<Self> {
        let repository = Self::default();
        {
            let mut guard = repository.users.lock().expect("users mutex poisoned");
            for user in users {
                guard.insert(user.id.clone(), user.clone());
            }
        }
        Arc::new(repository)
    }

    pub(super) fn stored(&self) -> Vec<Complaint> {
        self.complaints
            .lock()
            .expect("complaints mutex poisoned")
            .clone()
    }

    pub(super) fn remove_user(&self, id: &UserId) {
        self.users
            .lock()
            .expect("users mutex poisoned")
            .remove(id);
    }
}

impl ComplaintRepository for MemoryRepository {
    fn create(&self, complaint: NewComplaint) -> Result<Complaint, RepositoryError> {
        let citizen = self
            .users
            .lock()
            .expect("users mutex poisoned")
            .get(&complaint.citizen_id)
            .map(User::contact)
            .ok_or(RepositoryError::NotFound)?;

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let created_at = Utc
            .timestamp_opt(1_700_000_000 + sequence as i64, 0)
            .single()
            .expect("valid timestamp");

        let stored = Complaint {
            id: ComplaintId(format!("cmp-{:06}", sequence + 1)),
            title: complaint.title,
            description: complaint.description,
            location: complaint.location,
            photo_url: complaint.photo_url,
            category: complaint.category,
            priority: complaint.priority,
            citizen_id: complaint.citizen_id,
            created_at,
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

/// Storage double whose every call fails, for exercising the 500 path.
#[derive(Default)]
pub(super) struct UnavailableRepository;

impl ComplaintRepository for UnavailableRepository {
    fn create(&self, _complaint: NewComplaint) -> Result<Complaint, RepositoryError> {
        Err(RepositoryError::Unavailable("connection pool exhausted".to_string()))
    }

    fn list(&self, _scope: &RetrievalScope) -> Result<Vec<Complaint>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection pool exhausted".to_string()))
    }

    fn find_user(&self, _id: &UserId) -> Result<Option<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection pool exhausted".to_string()))
    }
}

/// Session-table verifier double.
pub(super) struct StaticVerifier {
    sessions: HashMap<String, UserId>,
}

impl StaticVerifier {
    pub(super) fn seeded() -> Arc<Self> {
        let mut sessions = HashMap::new();
        sessions.insert(CITIZEN_A_TOKEN.to_string(), citizen_a().id);
        sessions.insert(CITIZEN_B_TOKEN.to_string(), citizen_b().id);
        sessions.insert(ADMIN_TOKEN.to_string(), admin().id);
        sessions.insert(ORPHAN_TOKEN.to_string(), UserId("usr-gone".to_string()));
        Arc::new(Self { sessions })
    }
}

impl TokenVerifier for StaticVerifier {
    fn verify(&self, token: &str) -> Option<AuthPayload> {
        self.sessions.get(token).map(|user_id| AuthPayload {
            user_id: user_id.clone(),
        })
    }
}

/// Scripted scoring collaborator: fixed reply or fixed failure, with a call
/// counter so tests can assert the scorer was never reached.
pub(super) struct ScriptedClient {
    reply: Result<&'static str, &'static str>,
    calls: AtomicU64,
}

impl ScriptedClient {
    pub(super) fn replying(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            calls: AtomicU64::new(0),
        })
    }

    pub(super) fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err("scoring collaborator unreachable"),
            calls: AtomicU64::new(0),
        })
    }

    pub(super) fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, _model: &str, _prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.reply
            .map(str::to_string)
            .map_err(|message| CompletionError::Transport(message.to_string()))
    }
}

pub(super) fn build_service<R: ComplaintRepository + 'static>(
    repository: Arc<R>,
    client: Arc<ScriptedClient>,
) -> ComplaintService<R, ScriptedClient> {
    ComplaintService::new(repository, PriorityScorer::new(client, "gpt-4o-mini"))
}
