use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted complaints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplaintId(pub String);

/// Identifier wrapper for user records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Fixed taxonomy for a complaint's subject matter.
///
/// Assigned by the classifier at creation time, never supplied by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Road,
    Water,
    Sanitation,
    Lighting,
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Road => "road",
            Category::Water => "water",
            Category::Sanitation => "sanitation",
            Category::Lighting => "lighting",
            Category::Other => "other",
        }
    }
}

/// Role determining retrieval scope and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Citizen,
    Admin,
}

/// User record as resolved through the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn contact(&self) -> CitizenContact {
        CitizenContact {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Denormalized creator view joined onto complaint responses. Exposes name
/// and email only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenContact {
    pub name: String,
    pub email: String,
}

/// Client-supplied intake payload. The creating citizen's identity comes from
/// the authentication gate, so the type carries no identity field at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSubmission {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl ComplaintSubmission {
    /// Require a non-blank title and description.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        Ok(())
    }
}

/// Intake payload rejections.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    MissingTitle,
    #[error("description must not be empty")]
    MissingDescription,
}

/// Fully-formed record handed to the storage collaborator for a single atomic
/// write. Category and priority are already computed; the id and timestamp are
/// assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub photo_url: Option<String>,
    pub category: Category,
    pub priority: u8,
    pub citizen_id: UserId,
}

/// Persisted complaint, immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: ComplaintId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub photo_url: Option<String>,
    pub category: Category,
    pub priority: u8,
    pub citizen_id: UserId,
    pub created_at: DateTime<Utc>,
    pub citizen: CitizenContact,
}

/// Closed retrieval branch driving both the storage query and its ordering.
///
/// Administrators triage by urgency; citizens track their own submissions
/// chronologically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalScope {
    Admin,
    OwnedBy(UserId),
}

impl RetrievalScope {
    pub fn for_user(user: &User) -> Self {
        match user.role {
            Role::Admin => RetrievalScope::Admin,
            Role::Citizen => RetrievalScope::OwnedBy(user.id.clone()),
        }
    }

    pub fn ordering(&self) -> ComplaintOrdering {
        match self {
            RetrievalScope::Admin => ComplaintOrdering::PriorityDesc,
            RetrievalScope::OwnedBy(_) => ComplaintOrdering::CreatedAtDesc,
        }
    }
}

/// Ordering clause applied by the storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintOrdering {
    PriorityDesc,
    CreatedAtDesc,
}
