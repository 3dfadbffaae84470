//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

mod handle_inbound_message;

pub use handle_inbound_message::{HandleInboundMessageHandler, HandleInboundMessageResult};
