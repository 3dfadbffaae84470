//! Session module - per-user conversation state.
//!
//! - `ConversationState` - the menu flow state machine
//! - `SessionMode` - normal flow vs. feedback interception
//! - `Session` - the aggregate the conversation engine mutates

mod aggregate;
mod state;

pub use aggregate::{Session, RECENT_MESSAGE_IDS};
pub use state::{ConversationState, SessionMode};
