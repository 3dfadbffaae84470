//! Conversation flow: the per-user state machine and its feedback sub-flow.

mod engine;
mod feedback;

pub use engine::{ConversationEngine, EngineConfig, FollowUp, InboundMessage, Transition};
pub use feedback::{FeedbackCollector, FeedbackOutcome};
