//! Supported conversation languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Language a session is conducted in.
///
/// The numeric index is the option the user types on the language menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Portuguese, used until the user chooses otherwise.
    #[default]
    Pt,
    En,
    Es,
}

impl Language {
    /// All languages in menu order.
    pub const ALL: [Language; 3] = [Language::Pt, Language::En, Language::Es];

    /// Resolves a language menu option (1-3).
    pub fn from_menu_index(index: i64) -> Option<Self> {
        match index {
            1 => Some(Language::Pt),
            2 => Some(Language::En),
            3 => Some(Language::Es),
            _ => None,
        }
    }

    /// Returns the option number shown on the language menu.
    pub fn menu_index(&self) -> u8 {
        match self {
            Language::Pt => 1,
            Language::En => 2,
            Language::Es => 3,
        }
    }

    /// Returns the ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" => Ok(Language::Pt),
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            other => Err(ValidationError::invalid_format(
                "language",
                format!("unsupported language '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_index_roundtrips() {
        for language in Language::ALL {
            assert_eq!(
                Language::from_menu_index(language.menu_index() as i64),
                Some(language)
            );
        }
    }

    #[test]
    fn out_of_range_index_is_none() {
        assert_eq!(Language::from_menu_index(0), None);
        assert_eq!(Language::from_menu_index(4), None);
    }

    #[test]
    fn default_is_portuguese() {
        assert_eq!(Language::default(), Language::Pt);
    }

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }
}
