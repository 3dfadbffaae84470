//! Main menu entries and the actions they trigger.

use serde::{Deserialize, Serialize};

use crate::domain::place::Category;

/// One line of the localized main menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub option_number: u8,
    pub description: String,
}

impl MenuEntry {
    pub fn new(option_number: u8, description: impl Into<String>) -> Self {
        Self {
            option_number,
            description: description.into(),
        }
    }
}

/// What a main menu choice does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// List the first page of a category.
    Browse(Category),
    /// Start collecting a 1-5 rating.
    GiveFeedback,
    /// Go back to the language menu.
    ChangeLanguage,
    /// Stop the conversation until the user writes again.
    Exit,
}

impl MenuAction {
    /// Resolves a main menu option number.
    pub fn from_option(option: i64) -> Option<Self> {
        match option {
            1 => Some(MenuAction::Browse(Category::Hotel)),
            2 => Some(MenuAction::Browse(Category::Restaurant)),
            3 => Some(MenuAction::Browse(Category::Attraction)),
            4 => Some(MenuAction::GiveFeedback),
            5 => Some(MenuAction::ChangeLanguage),
            0 => Some(MenuAction::Exit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_options_map_to_browse() {
        assert_eq!(
            MenuAction::from_option(1),
            Some(MenuAction::Browse(Category::Hotel))
        );
        assert_eq!(
            MenuAction::from_option(2),
            Some(MenuAction::Browse(Category::Restaurant))
        );
        assert_eq!(
            MenuAction::from_option(3),
            Some(MenuAction::Browse(Category::Attraction))
        );
    }

    #[test]
    fn control_options_map() {
        assert_eq!(MenuAction::from_option(4), Some(MenuAction::GiveFeedback));
        assert_eq!(MenuAction::from_option(5), Some(MenuAction::ChangeLanguage));
        assert_eq!(MenuAction::from_option(0), Some(MenuAction::Exit));
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert_eq!(MenuAction::from_option(6), None);
        assert_eq!(MenuAction::from_option(9), None);
        assert_eq!(MenuAction::from_option(-1), None);
    }
}
