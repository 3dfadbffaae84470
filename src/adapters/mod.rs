//! Adapters - implementations of the ports and the HTTP surface.

pub mod catalog;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod whatsapp;
