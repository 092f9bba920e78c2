//! Complaint intake and prioritization pipeline.
//!
//! Authentication gating, category classification, priority scoring with
//! fallback, persistence through the storage collaborator, and role-scoped
//! retrieval with asymmetric ordering.

pub mod auth;
pub mod category;
pub mod domain;
pub mod openai;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use auth::{authenticate, AuthError, AuthPayload, TokenVerifier, AUTH_COOKIE};
pub use category::categorize;
pub use domain::{
    Category, CitizenContact, Complaint, ComplaintId, ComplaintOrdering, ComplaintSubmission,
    NewComplaint, RetrievalScope, Role, User, UserId, ValidationError,
};
pub use openai::OpenAiChatClient;
pub use repository::{ComplaintRepository, RepositoryError};
pub use router::complaint_router;
pub use scoring::{CompletionClient, CompletionError, PriorityScorer, FALLBACK_PRIORITY};
pub use service::{ComplaintService, ComplaintServiceError};
