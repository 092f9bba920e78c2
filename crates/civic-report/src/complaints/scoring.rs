//! Urgency scoring through an external natural-language collaborator.
//!
//! The collaborator is best-effort and untrusted: its reply is parsed
//! defensively and every failure is collapsed into the fixed fallback
//! priority before anything reaches persistence. Complaint intake never
//! fails because scoring is unavailable.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

/// Priority persisted when the scoring collaborator fails outright.
pub const FALLBACK_PRIORITY: u8 = 1;

/// Score assumed when a reply arrives but contains no integer.
const NEUTRAL_PRIORITY: i64 = 5;

const MIN_PRIORITY: i64 = 1;
const MAX_PRIORITY: i64 = 10;

/// Chat-style completion seam for the scoring collaborator.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, CompletionError>;
}

/// Failures surfaced by completion clients. The scorer absorbs all of them;
/// none reach the intake pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("collaborator returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

/// Priority scorer backed by an injected completion collaborator.
pub struct PriorityScorer<C> {
    client: Arc<C>,
    model: String,
}

impl<C> PriorityScorer<C>
where
    C: CompletionClient,
{
    pub fn new(client: Arc<C>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Score a complaint, collapsing any collaborator failure into
    /// [`FALLBACK_PRIORITY`]. The fallback is logged as a warning and never
    /// surfaced to the caller.
    pub async fn score(&self, title: &str, description: &str, photo_url: Option<&str>) -> u8 {
        match self.request_score(title, description, photo_url).await {
            Ok(priority) => priority,
            Err(err) => {
                warn!(error = %err, "priority scoring unavailable, using fallback priority");
                FALLBACK_PRIORITY
            }
        }
    }

    async fn request_score(
        &self,
        title: &str,
        description: &str,
        photo_url: Option<&str>,
    ) -> Result<u8, CompletionError> {
        let prompt = scoring_prompt(title, description, photo_url);
        let reply = self.client.complete(&self.model, &prompt).await?;
        Ok(clamp_priority(
            first_integer(&reply).unwrap_or(NEUTRAL_PRIORITY),
        ))
    }
}

fn scoring_prompt(title: &str, description: &str, photo_url: Option<&str>) -> String {
    format!(
        "You are a civic issue prioritization model.\n\
         Based on the following complaint details, assign a priority score \
         from 1 (least urgent) to 10 (most urgent).\n\
         \n\
         Complaint:\n\
         - Title: {title}\n\
         - Description: {description}\n\
         - Image URL: {image}\n\
         \n\
         Rules:\n\
         - Garbage blocking road, major potholes, broken streetlights on \
         highways, or water leakage = higher score (7-10).\n\
         - Small issues like minor litter, small potholes, or cosmetic \
         issues = lower score (1-5).\n\
         - Always return ONLY a single integer between 1 and 10.\n",
        image = photo_url.unwrap_or("No image"),
    )
}

/// First run of ASCII digits anywhere in the reply. Capped at nine digits so
/// absurdly long runs still parse and end up clamped.
fn first_integer(text: &str) -> Option<i64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .take(9)
        .collect();
    digits.parse().ok()
}

fn clamp_priority(value: i64) -> u8 {
    value.clamp(MIN_PRIORITY, MAX_PRIORITY) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedClient {
        reply: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(&self, _model: &str, _prompt: &str) -> Result<String, CompletionError> {
            self.reply
                .map(str::to_string)
                .map_err(|message| CompletionError::Transport(message.to_string()))
        }
    }

    fn scorer(reply: Result<&'static str, &'static str>) -> PriorityScorer<ScriptedClient> {
        PriorityScorer::new(Arc::new(ScriptedClient { reply }), "gpt-4o-mini")
    }

    #[test]
    fn parses_first_integer_from_decorated_reply() {
        assert_eq!(first_integer("Priority: 9 (urgent)"), Some(9));
        assert_eq!(first_integer("7"), Some(7));
        assert_eq!(first_integer("score 3, maybe 8"), Some(3));
    }

    #[test]
    fn reply_without_integer_parses_to_none() {
        assert_eq!(first_integer("no idea"), None);
        assert_eq!(first_integer(""), None);
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(clamp_priority(0), 1);
        assert_eq!(clamp_priority(-3), 1);
        assert_eq!(clamp_priority(42), 10);
        assert_eq!(clamp_priority(10), 10);
    }

    #[test]
    fn prompt_marks_missing_image_explicitly() {
        let prompt = scoring_prompt("Pothole", "Deep pothole", None);
        assert!(prompt.contains("Image URL: No image"));
        let prompt = scoring_prompt("Pothole", "Deep pothole", Some("https://img/1.jpg"));
        assert!(prompt.contains("Image URL: https://img/1.jpg"));
    }

    #[tokio::test]
    async fn decorated_reply_scores_its_first_integer() {
        let priority = scorer(Ok("Priority: 9 (urgent)"))
            .score("Pothole", "Deep pothole", None)
            .await;
        assert_eq!(priority, 9);
    }

    #[tokio::test]
    async fn non_numeric_reply_scores_neutral() {
        let priority = scorer(Ok("unable to assess"))
            .score("Pothole", "Deep pothole", None)
            .await;
        assert_eq!(priority, 5);
    }

    #[tokio::test]
    async fn out_of_range_reply_is_clamped() {
        let priority = scorer(Ok("definitely a 99"))
            .score("Pothole", "Deep pothole", None)
            .await;
        assert_eq!(priority, 10);
    }

    #[tokio::test]
    async fn collaborator_failure_falls_back_to_default() {
        let priority = scorer(Err("connection refused"))
            .score("Pothole", "Deep pothole", None)
            .await;
        assert_eq!(priority, FALLBACK_PRIORITY);
    }
}
