//! Client registry port.
//!
//! Remembers every contact that has written to the bot. Independent of the
//! conversation state: a failure here never blocks a reply.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Port for the contact list.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Register the contact if unseen. Calling it again is a no-op.
    async fn ensure_client(&self, user_id: &UserId, display_name: &str) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_registry_is_object_safe() {
        fn _accepts_dyn(_registry: &dyn ClientRegistry) {}
    }
}
