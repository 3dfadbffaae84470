//! Conversation module - pure pieces of the chat flow.
//!
//! - `input` - parsing of inbound text and browsing commands
//! - `outbound` - messages a transition produces
//! - `render` - layout of menus, listings and item details
//!
//! The engine that drives these against the ports lives in
//! `application::conversation`.

mod input;
mod outbound;
pub mod render;

pub use input::{BrowseCommand, Input, BACK_TO_MENU, GO_BACK, SEE_MORE};
pub use outbound::{MediaAttachment, Outbound};
