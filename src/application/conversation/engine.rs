//! Conversation engine - drives one session through one inbound message.
//!
//! The engine is pure with respect to delivery: it mutates the session and
//! returns the messages to send. Persistence, locking and sending belong to
//! the inbound message handler.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::domain::catalog::{Language, MenuAction, Texts};
use crate::domain::conversation::{render, BrowseCommand, Input, Outbound};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::place::{Category, Page, PageMove, PageWindow};
use crate::domain::session::{ConversationState, Session};
use crate::ports::{CatalogLoader, ItemRepository};

use super::FeedbackCollector;

/// Last resort reply when not even the catalog can be read.
const FALLBACK_ERROR: &str = "Desculpe, ocorreu um erro. Tente novamente mais tarde.";

/// Tunables of the conversation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Items per category page.
    pub page_size: u32,
    /// Quiet period after which a session starts over. `None` disables it.
    pub idle_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            idle_timeout: None,
        }
    }
}

/// A message received from the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub user_id: UserId,
    pub text: String,
    pub timestamp: Timestamp,
    pub display_name: Option<String>,
    /// Channel id of the message; redeliveries carry the same id.
    pub message_id: Option<String>,
}

impl InboundMessage {
    pub fn new(user_id: UserId, text: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            user_id,
            text: text.into(),
            timestamp,
            display_name: None,
            message_id: None,
        }
    }

    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// The contact name, or the phone number when the channel sent none.
    pub fn display_name_or_id(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.user_id.as_str())
    }
}

/// Work the caller must schedule after delivering the outbound messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Send the main menu after the configured delay, if the session is
    /// still waiting for it by then.
    MainMenuAfterDelay,
}

/// Outcome of handling one message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    pub outbound: Vec<Outbound>,
    pub follow_up: Option<FollowUp>,
}

impl Transition {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn reply(outbound: Vec<Outbound>) -> Self {
        Self {
            outbound,
            follow_up: None,
        }
    }

    fn then(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }
}

/// Per-user state machine over the tourism menu.
pub struct ConversationEngine {
    items: Arc<dyn ItemRepository>,
    catalog: Arc<dyn CatalogLoader>,
    feedback: FeedbackCollector,
    config: EngineConfig,
}

impl ConversationEngine {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        catalog: Arc<dyn CatalogLoader>,
        feedback: FeedbackCollector,
        config: EngineConfig,
    ) -> Self {
        Self {
            items,
            catalog,
            feedback,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Process one inbound message against the session.
    ///
    /// Never fails: every error is either answered with the localized
    /// generic error (the session keeps its previous state) or, for
    /// invariant violations, logged and answered after resetting the
    /// session to language selection.
    ///
    /// Redelivered message ids and messages older than the last processed
    /// one are ignored without a reply.
    pub async fn handle(&self, session: &mut Session, message: &InboundMessage) -> Transition {
        if let Some(id) = message.message_id.as_deref() {
            if session.has_processed(id) {
                debug!(user_id = %session.user_id(), message_id = id, "Ignoring duplicate delivery");
                return Transition::none();
            }
        }
        if is_stale(session, &message.timestamp) {
            debug!(
                user_id = %session.user_id(),
                state = %session.state(),
                timestamp = message.timestamp.as_unix_secs(),
                "Ignoring stale delivery"
            );
            return Transition::none();
        }

        let mut working = session.clone();
        if self.is_expired(&working, &message.timestamp) {
            debug!(user_id = %session.user_id(), "Session idle past timeout, starting over");
            working.reset();
        }

        match self.dispatch(&mut working, message).await {
            Ok(transition) => {
                record(&mut working, message);
                *session = working;
                transition
            }
            Err(err) if is_invariant_violation(&err) => {
                error!(
                    user_id = %session.user_id(),
                    state = %session.state(),
                    error = %err,
                    "Session invariant violated, resetting"
                );
                session.reset();
                record(session, message);
                Transition::reply(vec![self.generic_error(session).await])
            }
            Err(err) => {
                warn!(
                    user_id = %session.user_id(),
                    state = %session.state(),
                    code = %err.code,
                    error = %err,
                    "Failed to handle message, state kept"
                );
                record(session, message);
                Transition::reply(vec![self.generic_error(session).await])
            }
        }
    }

    /// Deliver the delayed main menu.
    ///
    /// Returns `None` when the session already left `AwaitingMainMenu`,
    /// e.g. because the user typed before the delay elapsed.
    ///
    /// # Errors
    ///
    /// - `CatalogUnavailable` if the menu cannot be loaded
    pub async fn deliver_main_menu(
        &self,
        session: &mut Session,
    ) -> Result<Option<Vec<Outbound>>, DomainError> {
        if session.state() != ConversationState::AwaitingMainMenu {
            return Ok(None);
        }
        let transition = self.show_main_menu(session, None).await?;
        Ok(Some(transition.outbound))
    }

    /// The localized generic error, or a built-in one if the catalog failed.
    pub async fn generic_error(&self, session: &Session) -> Outbound {
        match self.catalog.load_texts(session.effective_language()).await {
            Ok(texts) => Outbound::text(texts.generic_error.clone()),
            Err(err) => {
                warn!(error = %err, "Catalog unavailable for error reply");
                Outbound::text(FALLBACK_ERROR)
            }
        }
    }

    fn is_expired(&self, session: &Session, now: &Timestamp) -> bool {
        let Some(timeout) = self.config.idle_timeout else {
            return false;
        };
        if session.state() == ConversationState::AwaitingLanguageSelection {
            return false;
        }
        session
            .idle_for(now)
            .and_then(|idle| idle.to_std().ok())
            .map_or(false, |idle| idle > timeout)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Dispatch
    // ════════════════════════════════════════════════════════════════════════

    async fn dispatch(
        &self,
        session: &mut Session,
        message: &InboundMessage,
    ) -> Result<Transition, DomainError> {
        let input = Input::parse(&message.text);

        if session.is_collecting_feedback() {
            let texts = self.texts(session).await?;
            let outcome = self
                .feedback
                .handle(session, &input, message.display_name_or_id(), &texts)
                .await?;
            return Ok(Transition::reply(outcome.outbound));
        }

        use ConversationState::*;
        match session.state() {
            AwaitingLanguageSelection => self.show_language_menu(session).await,
            AwaitingLanguageResponse => self.on_language_response(session, &input, message).await,
            AwaitingWelcome => self.welcome(session, message).await,
            AwaitingMainMenu => self.show_main_menu(session, None).await,
            AwaitingMenuChoice => self.on_menu_choice(session, &input).await,
            AwaitingCategorySelection | AwaitingMoreItems => self.on_browse(session, &input).await,
            ListeningOnly => {
                session.transition_to(AwaitingLanguageSelection)?;
                self.show_language_menu(session).await
            }
        }
    }

    async fn show_language_menu(&self, session: &mut Session) -> Result<Transition, DomainError> {
        let texts = self.texts(session).await?;
        session.transition_to(ConversationState::AwaitingLanguageResponse)?;
        Ok(Transition::reply(vec![Outbound::text(
            texts.language_menu.clone(),
        )]))
    }

    async fn on_language_response(
        &self,
        session: &mut Session,
        input: &Input,
        message: &InboundMessage,
    ) -> Result<Transition, DomainError> {
        let Some(language) = input
            .as_number()
            .and_then(Language::from_menu_index)
        else {
            let texts = self.texts(session).await?;
            return Ok(Transition::reply(vec![Outbound::text(
                texts.language_menu.clone(),
            )]));
        };

        session.choose_language(language);
        session.transition_to(ConversationState::AwaitingWelcome)?;
        debug!(user_id = %session.user_id(), language = language.code(), "Language chosen");
        self.welcome(session, message).await
    }

    async fn welcome(
        &self,
        session: &mut Session,
        message: &InboundMessage,
    ) -> Result<Transition, DomainError> {
        let texts = self.texts(session).await?;
        let name = message
            .display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty());
        session.transition_to(ConversationState::AwaitingMainMenu)?;
        Ok(
            Transition::reply(vec![Outbound::text(texts.welcome_for(name))])
                .then(FollowUp::MainMenuAfterDelay),
        )
    }

    /// Send the main menu, optionally preceded by a notice, and wait for a
    /// choice. Works from `AwaitingMainMenu` and from the browsing states.
    async fn show_main_menu(
        &self,
        session: &mut Session,
        notice: Option<String>,
    ) -> Result<Transition, DomainError> {
        let language = session.effective_language();
        let texts = self.catalog.load_texts(language).await?;
        let menu = self.catalog.load_menu(language).await?;

        if session.state() != ConversationState::AwaitingMenuChoice {
            session.transition_to(ConversationState::AwaitingMenuChoice)?;
        }
        session.clear_browsing();

        let mut outbound: Vec<Outbound> = notice.into_iter().map(Outbound::text).collect();
        outbound.push(Outbound::text(render::main_menu(&texts, &menu)));
        Ok(Transition::reply(outbound))
    }

    async fn on_menu_choice(
        &self,
        session: &mut Session,
        input: &Input,
    ) -> Result<Transition, DomainError> {
        let texts = self.texts(session).await?;
        let Some(action) = input.as_number().and_then(MenuAction::from_option) else {
            return self
                .show_main_menu(session, Some(texts.invalid_option.clone()))
                .await;
        };

        match action {
            MenuAction::Browse(category) => {
                let window = PageWindow::first(self.config.page_size, 0);
                self.show_page(session, category, window, &texts).await
            }
            MenuAction::GiveFeedback => {
                let prompt = self.feedback.begin(session, &texts);
                Ok(Transition::reply(vec![prompt]))
            }
            MenuAction::ChangeLanguage => {
                session.transition_to(ConversationState::AwaitingLanguageSelection)?;
                self.show_language_menu(session).await
            }
            MenuAction::Exit => {
                session.transition_to(ConversationState::ListeningOnly)?;
                Ok(Transition::reply(vec![Outbound::text(texts.goodbye.clone())]))
            }
        }
    }

    async fn on_browse(
        &self,
        session: &mut Session,
        input: &Input,
    ) -> Result<Transition, DomainError> {
        let Some((category, page)) = session.current_page(self.config.page_size) else {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Browsing state without a category",
            )
            .with_detail("state", session.state().to_string()));
        };
        let texts = self.texts(session).await?;

        let command = BrowseCommand::from_input(input, page.items.len());
        let movement = match command {
            Some(BrowseCommand::Select(choice)) => {
                let Some(item) = page.select(choice as i64) else {
                    return Ok(self.invalid_on_page(&texts, category, &page));
                };
                let outbound = render::item_detail(&texts, item, &page.window);
                session.transition_to(ConversationState::AwaitingMoreItems)?;
                return Ok(Transition::reply(outbound));
            }
            Some(BrowseCommand::MainMenu) => return self.show_main_menu(session, None).await,
            Some(BrowseCommand::SeeMore) => PageMove::Forward,
            Some(BrowseCommand::GoBack) => PageMove::Back,
            None => return Ok(self.invalid_on_page(&texts, category, &page)),
        };

        match page.window.apply(movement) {
            Some(window) => self.show_page(session, category, window, &texts).await,
            None => Ok(self.invalid_on_page(&texts, category, &page)),
        }
    }

    /// Fetch and display a page of a category, remembering it on the session.
    async fn show_page(
        &self,
        session: &mut Session,
        category: Category,
        window: PageWindow,
        texts: &Texts,
    ) -> Result<Transition, DomainError> {
        let total = self.items.count(category).await?;
        let window = PageWindow { total, ..window }.clamped();
        let items = self
            .items
            .find_page(category, window.offset, window.size)
            .await?;
        let page = Page::new(window, items);

        session.transition_to(ConversationState::AwaitingCategorySelection)?;
        session.show_page(category, &page);

        debug!(
            user_id = %session.user_id(),
            category = category.as_str(),
            offset = window.offset,
            total,
            shown = page.items.len(),
            "Showing category page"
        );
        Ok(Transition::reply(vec![Outbound::text(render::category_list(
            texts, category, &page,
        ))]))
    }

    fn invalid_on_page(&self, texts: &Texts, category: Category, page: &Page) -> Transition {
        Transition::reply(vec![
            Outbound::text(texts.invalid_option.clone()),
            Outbound::text(render::category_list(texts, category, page)),
        ])
    }

    async fn texts(&self, session: &Session) -> Result<Arc<Texts>, DomainError> {
        self.catalog.load_texts(session.effective_language()).await
    }
}

/// Listening sessions only wake for strictly newer messages; elsewhere a
/// message from the same second as the last one is still accepted.
fn is_stale(session: &Session, at: &Timestamp) -> bool {
    if session.state() == ConversationState::ListeningOnly {
        !session.is_new_activity(at)
    } else {
        session.is_out_of_order(at)
    }
}

fn record(session: &mut Session, message: &InboundMessage) {
    session.touch(message.timestamp);
    if let Some(id) = &message.message_id {
        session.remember_message(id.clone());
    }
}

fn is_invariant_violation(err: &DomainError) -> bool {
    matches!(
        err.code,
        ErrorCode::InvalidStateTransition | ErrorCode::InternalError
    )
}
