//! Feedback collection sub-flow.
//!
//! While a session is in `CollectingFeedback` mode every inbound message is
//! routed here and nothing else in the menu flow runs for that session.

use std::sync::Arc;

use tracing::debug;

use crate::domain::catalog::Texts;
use crate::domain::conversation::{Input, Outbound};
use crate::domain::foundation::{DomainError, FeedbackRating};
use crate::domain::session::{ConversationState, Session};
use crate::ports::{FeedbackRecord, FeedbackStore};

/// Result of feeding one message to the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackOutcome {
    /// True when a rating was stored and the sub-flow ended.
    pub accepted: bool,
    pub outbound: Vec<Outbound>,
}

/// Collects a 1-5 rating and upserts it keyed by user.
pub struct FeedbackCollector {
    store: Arc<dyn FeedbackStore>,
}

impl FeedbackCollector {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    /// Switch the session into collection mode and return the prompt.
    ///
    /// The conversation state is left as it is.
    pub fn begin(&self, session: &mut Session, texts: &Texts) -> Outbound {
        session.begin_feedback();
        Outbound::text(texts.feedback_prompt.clone())
    }

    /// Handle one message while collecting.
    ///
    /// Non-numeric or out-of-range input re-prompts and keeps the mode.
    /// A valid rating is upserted, the mode is cleared and the session goes
    /// idle in `ListeningOnly`.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the rating cannot be stored; the session is untouched
    /// - `InvalidStateTransition` if the session cannot go idle from its state
    pub async fn handle(
        &self,
        session: &mut Session,
        input: &Input,
        display_name: &str,
        texts: &Texts,
    ) -> Result<FeedbackOutcome, DomainError> {
        let rating = match input.as_number().map(FeedbackRating::try_new) {
            Some(Ok(rating)) => rating,
            _ => {
                debug!(user_id = %session.user_id(), ?input, "Rejected feedback input");
                return Ok(FeedbackOutcome {
                    accepted: false,
                    outbound: vec![Outbound::text(texts.feedback_prompt.clone())],
                });
            }
        };

        let record = FeedbackRecord::new(session.user_id().clone(), display_name, rating);
        self.store.upsert(&record).await?;

        session.end_feedback();
        session.clear_browsing();
        if session.state() != ConversationState::ListeningOnly {
            session.transition_to(ConversationState::ListeningOnly)?;
        }

        debug!(user_id = %session.user_id(), rating = %rating, "Feedback recorded");
        Ok(FeedbackOutcome {
            accepted: true,
            outbound: vec![Outbound::text(texts.feedback_confirmation.clone())],
        })
    }
}
