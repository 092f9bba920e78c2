use std::sync::Arc;

use super::category::categorize;
use super::domain::{
    Complaint, ComplaintSubmission, NewComplaint, RetrievalScope, UserId, ValidationError,
};
use super::repository::{ComplaintRepository, RepositoryError};
use super::scoring::{CompletionClient, PriorityScorer};

/// Service composing the classifier, the priority scorer, and the storage
/// collaborator behind one orchestration surface.
pub struct ComplaintService<R, C> {
    repository: Arc<R>,
    scorer: PriorityScorer<C>,
}

impl<R, C> ComplaintService<R, C>
where
    R: ComplaintRepository + 'static,
    C: CompletionClient + 'static,
{
    pub fn new(repository: Arc<R>, scorer: PriorityScorer<C>) -> Self {
        Self { repository, scorer }
    }

    /// Intake pipeline: validate, classify, score, persist.
    ///
    /// The creating identity comes from the authentication gate; anything the
    /// client claimed about ownership never reaches this point. Scoring has
    /// its own internal fallback and cannot abort the pipeline.
    pub async fn submit(
        &self,
        citizen_id: &UserId,
        submission: ComplaintSubmission,
    ) -> Result<Complaint, ComplaintServiceError> {
        submission.validate()?;

        let category = categorize(&submission.title, &submission.description);
        let priority = self
            .scorer
            .score(
                &submission.title,
                &submission.description,
                submission.photo_url.as_deref(),
            )
            .await;

        let record = NewComplaint {
            title: submission.title,
            description: submission.description,
            location: submission.location,
            photo_url: submission.photo_url,
            category,
            priority,
            citizen_id: citizen_id.clone(),
        };

        let stored = self.repository.create(record)?;
        Ok(stored)
    }

    /// Retrieval pipeline: resolve the caller's role, then fetch the scoped,
    /// ordered result set.
    pub fn list_for(&self, user_id: &UserId) -> Result<Vec<Complaint>, ComplaintServiceError> {
        let user = self
            .repository
            .find_user(user_id)?
            .ok_or(ComplaintServiceError::UserNotFound)?;
        let scope = RetrievalScope::for_user(&user);
        Ok(self.repository.list(&scope)?)
    }
}

/// Error raised by the complaint service.
#[derive(Debug, thiserror::Error)]
pub enum ComplaintServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
