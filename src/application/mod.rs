//! Application layer - the conversation engine and the handlers driving it.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod conversation;
pub mod handlers;
mod inbound_queue;
mod user_locks;

pub use conversation::{
    ConversationEngine, EngineConfig, FeedbackCollector, FeedbackOutcome, FollowUp,
    InboundMessage, Transition,
};
pub use handlers::{HandleInboundMessageHandler, HandleInboundMessageResult};
pub use inbound_queue::InboundQueue;
pub use user_locks::UserLocks;
