//! City Guide Bot - WhatsApp tourism guide
//!
//! A menu-driven chatbot that lets tourists browse hotels, restaurants and
//! attractions, page through results, view details and rate the service.
//! Each user has a session driven by a state machine; messages of one user
//! are handled strictly one at a time.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
