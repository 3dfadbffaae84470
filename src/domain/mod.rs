//! Domain layer containing the conversation rules and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors, state machine trait)
//! - `catalog` - Languages, menu entries and localized strings
//! - `place` - Item categories, items and pagination
//! - `session` - Per-user session aggregate and its state machine
//! - `conversation` - Input parsing and outbound message composition

pub mod catalog;
pub mod conversation;
pub mod foundation;
pub mod place;
pub mod session;
