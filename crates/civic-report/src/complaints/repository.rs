use super::domain::{Complaint, NewComplaint, RetrievalScope, User, UserId};

/// Storage abstraction so the intake and retrieval pipelines can be exercised
/// in isolation from any concrete backend.
pub trait ComplaintRepository: Send + Sync {
    /// Persist one fully-formed complaint as a single atomic write, assigning
    /// its id and creation timestamp and joining the creator's contact view.
    fn create(&self, complaint: NewComplaint) -> Result<Complaint, RepositoryError>;

    /// Fetch the scoped result set, ordered per the scope's ordering clause.
    fn list(&self, scope: &RetrievalScope) -> Result<Vec<Complaint>, RepositoryError>;

    /// Resolve a user record, or `None` when the identity no longer exists.
    fn find_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
