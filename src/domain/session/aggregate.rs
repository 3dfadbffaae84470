//! Session aggregate - one per user.
//!
//! Sessions are created lazily on a user's first message and are never
//! deleted. Only the conversation engine mutates them.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Language;
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, Timestamp, UserId};
use crate::domain::place::{Category, Item, Page, PageWindow};

use super::{ConversationState, SessionMode};

/// Channel message ids a session remembers for duplicate detection.
pub const RECENT_MESSAGE_IDS: usize = 20;

/// Per-user conversational state.
///
/// # Invariants
///
/// - `state` only changes through [`Session::transition_to`] or [`Session::reset`]
/// - `page_offset` is a non-negative multiple of the page size it was built with
/// - `cached_page` is the page last shown, in the order it was numbered
/// - `last_activity_at` never moves backwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    state: ConversationState,
    language: Option<Language>,
    mode: SessionMode,
    last_category: Option<Category>,
    page_offset: u32,
    category_total: u64,
    cached_page: Vec<Item>,
    last_activity_at: Option<Timestamp>,
    created_at: Timestamp,
    #[serde(default)]
    recent_message_ids: Vec<String>,
}

impl Session {
    /// Create a fresh session awaiting language selection.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            state: ConversationState::default(),
            language: None,
            mode: SessionMode::Normal,
            last_category: None,
            page_offset: 0,
            category_total: 0,
            cached_page: Vec::new(),
            last_activity_at: None,
            created_at: Timestamp::now(),
            recent_message_ids: Vec::new(),
        }
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        user_id: UserId,
        state: ConversationState,
        language: Option<Language>,
        mode: SessionMode,
        last_category: Option<Category>,
        page_offset: u32,
        category_total: u64,
        cached_page: Vec<Item>,
        last_activity_at: Option<Timestamp>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            state,
            language,
            mode,
            last_category,
            page_offset,
            category_total,
            cached_page,
            last_activity_at,
            created_at,
            recent_message_ids: Vec::new(),
        }
    }

    /// Restore the remembered message ids, keeping the newest.
    pub fn with_recent_message_ids(mut self, ids: Vec<String>) -> Self {
        let skip = ids.len().saturating_sub(RECENT_MESSAGE_IDS);
        self.recent_message_ids = ids.into_iter().skip(skip).collect();
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// The language explicitly chosen, if any.
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// The language to speak: the chosen one, or Portuguese until chosen.
    pub fn effective_language(&self) -> Language {
        self.language.unwrap_or_default()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn is_collecting_feedback(&self) -> bool {
        self.mode == SessionMode::CollectingFeedback
    }

    pub fn last_category(&self) -> Option<Category> {
        self.last_category
    }

    pub fn page_offset(&self) -> u32 {
        self.page_offset
    }

    pub fn category_total(&self) -> u64 {
        self.category_total
    }

    pub fn cached_page(&self) -> &[Item] {
        &self.cached_page
    }

    pub fn last_activity_at(&self) -> Option<Timestamp> {
        self.last_activity_at
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Newest last.
    pub fn recent_message_ids(&self) -> &[String] {
        &self.recent_message_ids
    }

    /// The page currently on screen, rebuilt from the cache.
    ///
    /// Returns `None` when no category is being browsed.
    pub fn current_page(&self, page_size: u32) -> Option<(Category, Page)> {
        let category = self.last_category?;
        let window = PageWindow {
            offset: self.page_offset,
            size: page_size,
            total: self.category_total,
        };
        Some((category, Page::new(window, self.cached_page.clone())))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Move to another state, rejecting transitions the state machine forbids.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the move is not allowed
    pub fn transition_to(&mut self, target: ConversationState) -> Result<(), DomainError> {
        self.state = self.state.transition_to(target).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("user_id", self.user_id.to_string())
        })?;
        Ok(())
    }

    /// Record the language the user picked.
    pub fn choose_language(&mut self, language: Language) {
        self.language = Some(language);
    }

    /// Start intercepting input for the rating prompt.
    pub fn begin_feedback(&mut self) {
        self.mode = SessionMode::CollectingFeedback;
    }

    /// Stop intercepting input for the rating prompt.
    pub fn end_feedback(&mut self) {
        self.mode = SessionMode::Normal;
    }

    /// Remember the page just sent so selections resolve against it.
    pub fn show_page(&mut self, category: Category, page: &Page) {
        self.last_category = Some(category);
        self.page_offset = page.window.offset;
        self.category_total = page.window.total;
        self.cached_page = page.items.clone();
    }

    /// Forget the browsed category.
    pub fn clear_browsing(&mut self) {
        self.last_category = None;
        self.page_offset = 0;
        self.category_total = 0;
        self.cached_page.clear();
    }

    /// Force the session back to its initial state, keeping identity and
    /// the chosen language. Used for idle expiry and corrupt state recovery.
    pub fn reset(&mut self) {
        self.state = ConversationState::AwaitingLanguageSelection;
        self.mode = SessionMode::Normal;
        self.clear_browsing();
    }

    /// Record activity at `at`. Earlier timestamps do not move the clock back.
    pub fn touch(&mut self, at: Timestamp) {
        self.last_activity_at = Some(match self.last_activity_at {
            Some(last) if last.is_after(&at) => last,
            _ => at,
        });
    }

    /// True when `at` is strictly after the last processed message.
    pub fn is_new_activity(&self, at: &Timestamp) -> bool {
        self.last_activity_at
            .map_or(true, |last| at.is_after(&last))
    }

    /// True when `at` is earlier than the last processed message.
    pub fn is_out_of_order(&self, at: &Timestamp) -> bool {
        self.last_activity_at.map_or(false, |last| last.is_after(at))
    }

    pub fn has_processed(&self, message_id: &str) -> bool {
        self.recent_message_ids.iter().any(|id| id == message_id)
    }

    /// Remember a processed message id, forgetting the oldest beyond
    /// [`RECENT_MESSAGE_IDS`].
    pub fn remember_message(&mut self, message_id: String) {
        if self.has_processed(&message_id) {
            return;
        }
        self.recent_message_ids.push(message_id);
        if self.recent_message_ids.len() > RECENT_MESSAGE_IDS {
            self.recent_message_ids.remove(0);
        }
    }

    /// How long the session had been quiet before `at`.
    pub fn idle_for(&self, at: &Timestamp) -> Option<Duration> {
        self.last_activity_at.map(|last| at.duration_since(&last))
    }
}
