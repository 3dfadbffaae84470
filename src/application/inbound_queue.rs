//! Per-user arrival-order dispatch of inbound messages.
//!
//! `enqueue` is synchronous, so a message's place in its user's queue is
//! fixed the moment the webhook hands it over. One worker task per user
//! drains that queue in order; the worker exits when the queue runs dry
//! and the next message starts a fresh one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, error, info_span, Instrument};

use crate::application::handlers::HandleInboundMessageHandler;
use crate::application::InboundMessage;
use crate::domain::foundation::UserId;

type Workers = HashMap<UserId, mpsc::UnboundedSender<InboundMessage>>;

/// Dispatcher keeping one FIFO queue per user.
pub struct InboundQueue {
    handler: Arc<HandleInboundMessageHandler>,
    workers: Mutex<Workers>,
}

impl InboundQueue {
    pub fn new(handler: Arc<HandleInboundMessageHandler>) -> Arc<Self> {
        Arc::new(Self {
            handler,
            workers: Mutex::new(HashMap::new()),
        })
    }

    /// Queue a message behind earlier messages of the same user.
    ///
    /// Returns true when a new worker was started for the user.
    pub fn enqueue(self: &Arc<Self>, message: InboundMessage) -> bool {
        let user_id = message.user_id.clone();
        let mut workers = self.workers();

        let message = match workers.get(&user_id) {
            Some(queue) => match queue.send(message) {
                Ok(()) => return false,
                // Receiver gone: the worker died without deregistering.
                Err(mpsc::error::SendError(message)) => message,
            },
            None => message,
        };
        workers.remove(&user_id);
        self.start_worker(&mut workers, message)
    }

    /// Users with a running worker.
    pub fn active_users(&self) -> usize {
        self.workers().len()
    }

    fn start_worker(self: &Arc<Self>, workers: &mut Workers, message: InboundMessage) -> bool {
        let user_id = message.user_id.clone();
        let (tx, rx) = mpsc::unbounded_channel();
        if tx.send(message).is_err() {
            return false;
        }
        workers.insert(user_id.clone(), tx);

        let queue = Arc::clone(self);
        let span = info_span!("inbound_worker", user_id = %user_id);
        tokio::spawn(async move { queue.drain(user_id, rx).await }.instrument(span));
        true
    }

    async fn drain(&self, user_id: UserId, mut rx: mpsc::UnboundedReceiver<InboundMessage>) {
        loop {
            // Checking and deregistering under the map lock means a
            // concurrent enqueue either lands in this queue or starts anew.
            let next = {
                let mut workers = self.workers();
                match rx.try_recv() {
                    Ok(message) => Some(message),
                    Err(_) => {
                        workers.remove(&user_id);
                        None
                    }
                }
            };
            let Some(message) = next else {
                debug!("Queue drained, worker exiting");
                return;
            };

            if let Err(err) = self.handler.handle(message).await {
                error!(error = %err, "Inbound message failed");
            }
        }
    }

    fn workers(&self) -> MutexGuard<'_, Workers> {
        self.workers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::BuiltinCatalog;
    use crate::adapters::memory::{
        InMemoryFeedbackStore, InMemoryItemRepository, InMemorySessionStore,
    };
    use crate::application::{ConversationEngine, EngineConfig, FeedbackCollector, UserLocks};
    use crate::domain::conversation::MediaAttachment;
    use crate::domain::foundation::{DomainError, Timestamp};
    use crate::domain::session::ConversationState;
    use crate::ports::{ClientRegistry, MessageSender, SessionStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Registry whose first call is slow, so a later message could overtake.
    #[derive(Default)]
    struct SlowFirstRegistry {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ClientRegistry for SlowFirstRegistry {
        async fn ensure_client(&self, _: &UserId, _: &str) -> Result<(), DomainError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Ok(())
        }
    }

    struct SilentSender;

    #[async_trait]
    impl MessageSender for SilentSender {
        async fn send_text(&self, _: &UserId, _: &str) -> Result<(), DomainError> {
            Ok(())
        }

        async fn send_media(&self, _: &UserId, _: &MediaAttachment) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn user() -> UserId {
        UserId::new("5567999990000").unwrap()
    }

    fn setup() -> (Arc<InboundQueue>, Arc<InMemorySessionStore>) {
        let engine = ConversationEngine::new(
            Arc::new(InMemoryItemRepository::new()),
            Arc::new(BuiltinCatalog::new()),
            FeedbackCollector::new(Arc::new(InMemoryFeedbackStore::new())),
            EngineConfig::default(),
        );
        let sessions = Arc::new(InMemorySessionStore::new());
        let handler = HandleInboundMessageHandler::new(
            Arc::new(engine),
            sessions.clone(),
            Arc::new(SilentSender),
            Arc::new(SlowFirstRegistry::default()),
            Arc::new(UserLocks::new()),
            Duration::from_secs(60),
        );
        (InboundQueue::new(Arc::new(handler)), sessions)
    }

    async fn wait_until_idle(queue: &InboundQueue) {
        for _ in 0..200 {
            if queue.active_users() == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("queue did not drain");
    }

    #[tokio::test]
    async fn messages_of_one_user_run_in_arrival_order() {
        let (queue, sessions) = setup();

        assert!(queue.enqueue(InboundMessage::new(user(), "oi", Timestamp::from_unix_secs(100))));
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(!queue.enqueue(InboundMessage::new(user(), "1", Timestamp::from_unix_secs(101))));

        wait_until_idle(&queue).await;

        let session = sessions.get(&user()).await.unwrap().unwrap();
        assert_eq!(session.state(), ConversationState::AwaitingMainMenu);
    }

    #[tokio::test]
    async fn worker_restarts_after_draining() {
        let (queue, sessions) = setup();

        queue.enqueue(InboundMessage::new(user(), "oi", Timestamp::from_unix_secs(100)));
        wait_until_idle(&queue).await;
        assert!(queue.enqueue(InboundMessage::new(user(), "2", Timestamp::from_unix_secs(101))));
        wait_until_idle(&queue).await;

        let session = sessions.get(&user()).await.unwrap().unwrap();
        assert_eq!(session.state(), ConversationState::AwaitingMainMenu);
    }
}
