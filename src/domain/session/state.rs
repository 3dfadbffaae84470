//! Conversation state machine.
//!
//! Defines the states a chat session moves through and the valid
//! transitions between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Where a session is in the menu-driven conversation.
///
/// - `AwaitingLanguageSelection`: language menu not yet sent
/// - `AwaitingLanguageResponse`: language menu sent, waiting for 1-3
/// - `AwaitingWelcome`: language chosen, welcome not yet sent
/// - `AwaitingMainMenu`: welcome sent, main menu scheduled
/// - `AwaitingMenuChoice`: main menu shown, waiting for an option
/// - `AwaitingCategorySelection`: a category page is shown
/// - `AwaitingMoreItems`: an item detail is shown, the page is still active
/// - `ListeningOnly`: idle until the user writes again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    AwaitingLanguageSelection,
    AwaitingLanguageResponse,
    AwaitingWelcome,
    AwaitingMainMenu,
    AwaitingMenuChoice,
    AwaitingCategorySelection,
    AwaitingMoreItems,
    ListeningOnly,
}

impl ConversationState {
    pub const ALL: [ConversationState; 8] = [
        ConversationState::AwaitingLanguageSelection,
        ConversationState::AwaitingLanguageResponse,
        ConversationState::AwaitingWelcome,
        ConversationState::AwaitingMainMenu,
        ConversationState::AwaitingMenuChoice,
        ConversationState::AwaitingCategorySelection,
        ConversationState::AwaitingMoreItems,
        ConversationState::ListeningOnly,
    ];

    /// Returns true while a category page is on screen.
    pub fn is_browsing(&self) -> bool {
        matches!(
            self,
            Self::AwaitingCategorySelection | Self::AwaitingMoreItems
        )
    }

    /// Stable name used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingLanguageSelection => "awaiting_language_selection",
            Self::AwaitingLanguageResponse => "awaiting_language_response",
            Self::AwaitingWelcome => "awaiting_welcome",
            Self::AwaitingMainMenu => "awaiting_main_menu",
            Self::AwaitingMenuChoice => "awaiting_menu_choice",
            Self::AwaitingCategorySelection => "awaiting_category_selection",
            Self::AwaitingMoreItems => "awaiting_more_items",
            Self::ListeningOnly => "listening_only",
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConversationState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("state", format!("unknown state '{}'", s))
            })
    }
}

impl StateMachine for ConversationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationState::*;
        matches!(
            (self, target),
            // Greeting
            (AwaitingLanguageSelection, AwaitingLanguageResponse) |
            (AwaitingLanguageResponse, AwaitingWelcome) |
            (AwaitingWelcome, AwaitingMainMenu) |
            (AwaitingMainMenu, AwaitingMenuChoice) |
            // Main menu
            (AwaitingMenuChoice, AwaitingCategorySelection) |
            (AwaitingMenuChoice, AwaitingLanguageSelection) |
            (AwaitingMenuChoice, ListeningOnly) |
            // Browsing: paging, detail, back to the menu
            (AwaitingCategorySelection, AwaitingCategorySelection) |
            (AwaitingCategorySelection, AwaitingMoreItems) |
            (AwaitingCategorySelection, AwaitingMenuChoice) |
            (AwaitingMoreItems, AwaitingMoreItems) |
            (AwaitingMoreItems, AwaitingCategorySelection) |
            (AwaitingMoreItems, AwaitingMenuChoice) |
            // Idle: the next message re-greets
            (ListeningOnly, AwaitingLanguageSelection)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationState::*;
        match self {
            AwaitingLanguageSelection => vec![AwaitingLanguageResponse],
            AwaitingLanguageResponse => vec![AwaitingWelcome],
            AwaitingWelcome => vec![AwaitingMainMenu],
            AwaitingMainMenu => vec![AwaitingMenuChoice],
            AwaitingMenuChoice => vec![
                AwaitingCategorySelection,
                AwaitingLanguageSelection,
                ListeningOnly,
            ],
            AwaitingCategorySelection => vec![
                AwaitingCategorySelection,
                AwaitingMoreItems,
                AwaitingMenuChoice,
            ],
            AwaitingMoreItems => vec![
                AwaitingMoreItems,
                AwaitingCategorySelection,
                AwaitingMenuChoice,
            ],
            ListeningOnly => vec![AwaitingLanguageSelection],
        }
    }
}

/// Whether inbound messages follow the menu flow or feed the rating prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    #[default]
    Normal,
    CollectingFeedback,
}

impl SessionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::Normal => "normal",
            SessionMode::CollectingFeedback => "collecting_feedback",
        }
    }
}

impl FromStr for SessionMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(SessionMode::Normal),
            "collecting_feedback" => Ok(SessionMode::CollectingFeedback),
            other => Err(ValidationError::invalid_format(
                "mode",
                format!("unknown mode '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod state_definition {
        use super::*;

        #[test]
        fn default_state_awaits_language_selection() {
            assert_eq!(
                ConversationState::default(),
                ConversationState::AwaitingLanguageSelection
            );
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&ConversationState::AwaitingMenuChoice).unwrap();
            assert_eq!(json, "\"awaiting_menu_choice\"");
        }

        #[test]
        fn as_str_roundtrips_for_every_state() {
            for state in ConversationState::ALL {
                assert_eq!(state.as_str().parse::<ConversationState>().unwrap(), state);
            }
        }

        #[test]
        fn unknown_state_name_is_rejected() {
            assert!("cleared".parse::<ConversationState>().is_err());
            assert!("".parse::<ConversationState>().is_err());
        }
    }

    mod state_machine_trait {
        use super::*;

        #[test]
        fn greeting_path_is_linear() {
            use ConversationState::*;
            assert!(AwaitingLanguageSelection.can_transition_to(&AwaitingLanguageResponse));
            assert!(AwaitingLanguageResponse.can_transition_to(&AwaitingWelcome));
            assert!(AwaitingWelcome.can_transition_to(&AwaitingMainMenu));
            assert!(AwaitingMainMenu.can_transition_to(&AwaitingMenuChoice));
            assert!(!AwaitingLanguageSelection.can_transition_to(&AwaitingMenuChoice));
        }

        #[test]
        fn listening_only_leaves_only_to_language_selection() {
            assert_eq!(
                ConversationState::ListeningOnly.valid_transitions(),
                vec![ConversationState::AwaitingLanguageSelection]
            );
        }

        #[test]
        fn no_state_is_terminal() {
            for state in ConversationState::ALL {
                assert!(!state.is_terminal(), "{:?} should not be terminal", state);
            }
        }

        #[test]
        fn valid_transitions_matches_can_transition_to() {
            for state in ConversationState::ALL {
                for target in ConversationState::ALL {
                    assert_eq!(
                        state.can_transition_to(&target),
                        state.valid_transitions().contains(&target),
                        "{:?} -> {:?}",
                        state,
                        target
                    );
                }
            }
        }
    }

    mod mode {
        use super::*;

        #[test]
        fn default_mode_is_normal() {
            assert_eq!(SessionMode::default(), SessionMode::Normal);
        }

        #[test]
        fn mode_names_roundtrip() {
            for mode in [SessionMode::Normal, SessionMode::CollectingFeedback] {
                assert_eq!(mode.as_str().parse::<SessionMode>().unwrap(), mode);
            }
        }
    }
}
