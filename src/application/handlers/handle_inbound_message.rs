//! HandleInboundMessageHandler - processes one channel message end to end.
//!
//! Order of work for a message:
//! 1. take the user's lock
//! 2. register the contact (best effort)
//! 3. load or create the session and run the engine
//! 4. send the replies, then persist the session
//! 5. release the lock and schedule the delayed main menu if requested

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info_span, warn, Instrument};

use crate::application::conversation::{ConversationEngine, FollowUp, InboundMessage};
use crate::application::UserLocks;
use crate::domain::conversation::Outbound;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::{ConversationState, Session, SessionMode};
use crate::ports::{ClientRegistry, MessageSender, SessionStore};

/// Result of handling one inbound message.
#[derive(Debug)]
pub struct HandleInboundMessageResult {
    pub state: ConversationState,
    pub mode: SessionMode,
    /// Messages accepted by the channel.
    pub delivered: usize,
    /// The pending main menu continuation, if one was scheduled.
    pub main_menu: Option<JoinHandle<()>>,
}

/// Handler wiring the engine to storage, locking and delivery.
#[derive(Clone)]
pub struct HandleInboundMessageHandler {
    engine: Arc<ConversationEngine>,
    sessions: Arc<dyn SessionStore>,
    sender: Arc<dyn MessageSender>,
    clients: Arc<dyn ClientRegistry>,
    locks: Arc<UserLocks>,
    main_menu_delay: Duration,
}

impl HandleInboundMessageHandler {
    pub fn new(
        engine: Arc<ConversationEngine>,
        sessions: Arc<dyn SessionStore>,
        sender: Arc<dyn MessageSender>,
        clients: Arc<dyn ClientRegistry>,
        locks: Arc<UserLocks>,
        main_menu_delay: Duration,
    ) -> Self {
        Self {
            engine,
            sessions,
            sender,
            clients,
            locks,
            main_menu_delay,
        }
    }

    /// Process one message under the user's lock.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the session cannot be loaded or saved
    /// - `MessagingError` if a text reply could not be sent; the session is
    ///   left as it was so the user can retry
    pub async fn handle(
        &self,
        message: InboundMessage,
    ) -> Result<HandleInboundMessageResult, DomainError> {
        let user_id = message.user_id.clone();
        let guard = self.locks.acquire(&user_id).await;

        if let Err(err) = self
            .clients
            .ensure_client(&user_id, message.display_name_or_id())
            .await
        {
            warn!(user_id = %user_id, error = %err, "Failed to register client");
        }

        let mut session = match self.sessions.get_or_create(&user_id).await {
            Ok(session) => session,
            Err(err) => {
                error!(user_id = %user_id, error = %err, "Failed to load session");
                let reply = self.engine.generic_error(&Session::new(user_id.clone())).await;
                self.send_best_effort(&user_id, reply).await;
                return Err(err);
            }
        };
        let previous_state = session.state();

        let transition = self.engine.handle(&mut session, &message).await;

        let delivered = match self.deliver(&user_id, &transition.outbound).await {
            Ok(delivered) => delivered,
            Err(err) => {
                error!(
                    user_id = %user_id,
                    error = %err,
                    "Failed to deliver reply, session not saved"
                );
                let reply = self.engine.generic_error(&session).await;
                self.send_best_effort(&user_id, reply).await;
                return Err(err);
            }
        };

        self.sessions.save(&session).await?;
        drop(guard);

        debug!(
            user_id = %user_id,
            from = %previous_state,
            to = %session.state(),
            mode = session.mode().as_str(),
            delivered,
            "Message handled"
        );

        let main_menu = match transition.follow_up {
            Some(FollowUp::MainMenuAfterDelay) => Some(self.schedule_main_menu(user_id)),
            None => None,
        };

        Ok(HandleInboundMessageResult {
            state: session.state(),
            mode: session.mode(),
            delivered,
            main_menu,
        })
    }

    /// Send the delayed main menu now, if the session still waits for it.
    ///
    /// Returns whether the menu was sent. A session that moved on in the
    /// meantime makes this a no-op.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on session load or save failure
    /// - `CatalogUnavailable` if the menu cannot be loaded
    /// - `MessagingError` if the menu could not be sent
    pub async fn fire_main_menu(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let _guard = self.locks.acquire(user_id).await;

        let Some(mut session) = self.sessions.get(user_id).await? else {
            return Ok(false);
        };
        let Some(outbound) = self.engine.deliver_main_menu(&mut session).await? else {
            debug!(user_id = %user_id, state = %session.state(), "Main menu no longer awaited");
            return Ok(false);
        };

        self.deliver(user_id, &outbound).await?;
        self.sessions.save(&session).await?;
        Ok(true)
    }

    fn schedule_main_menu(&self, user_id: UserId) -> JoinHandle<()> {
        let handler = self.clone();
        let span = info_span!("main_menu_after_delay", user_id = %user_id);
        tokio::spawn(
            async move {
                tokio::time::sleep(handler.main_menu_delay).await;
                if let Err(err) = handler.fire_main_menu(&user_id).await {
                    warn!(error = %err, "Delayed main menu failed");
                }
            }
            .instrument(span),
        )
    }

    /// Send replies in order. Text failures abort; media failures are
    /// logged and skipped.
    async fn deliver(&self, user_id: &UserId, outbound: &[Outbound]) -> Result<usize, DomainError> {
        let mut delivered = 0;
        for message in outbound {
            match message {
                Outbound::Text(body) => {
                    self.sender.send_text(user_id, body).await?;
                    delivered += 1;
                }
                Outbound::Media(media) => match self.sender.send_media(user_id, media).await {
                    Ok(()) => delivered += 1,
                    Err(err) => {
                        warn!(user_id = %user_id, url = %media.url, error = %err, "Skipping photo");
                    }
                },
            }
        }
        Ok(delivered)
    }

    async fn send_best_effort(&self, user_id: &UserId, reply: Outbound) {
        if let Outbound::Text(body) = reply {
            if let Err(err) = self.sender.send_text(user_id, &body).await {
                warn!(user_id = %user_id, error = %err, "Failed to send error reply");
            }
        }
    }
}
