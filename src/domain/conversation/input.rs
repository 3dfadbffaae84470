//! Parsing of inbound message text.

/// Option that pages forward through a category.
pub const SEE_MORE: i64 = 6;

/// Option that pages back through a category.
pub const GO_BACK: i64 = 7;

/// Option that leaves a listing for the main menu (and exits from it).
pub const BACK_TO_MENU: i64 = 0;

/// A trimmed inbound message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// The whole body is an integer.
    Number(i64),
    /// Anything else, including an empty body.
    Text(String),
}

impl Input {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(number) => Input::Number(number),
            Err(_) => Input::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Input::Number(n) => Some(*n),
            Input::Text(_) => None,
        }
    }
}

/// What a numeric input means while a category page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Show the item at this 1-based position of the displayed page.
    Select(usize),
    SeeMore,
    GoBack,
    MainMenu,
}

impl BrowseCommand {
    /// Interpret input against a page of `page_len` displayed items.
    ///
    /// Item numbers take precedence, so page sizes must stay below
    /// [`SEE_MORE`]. Availability of paging is checked by the caller.
    pub fn from_input(input: &Input, page_len: usize) -> Option<Self> {
        let number = input.as_number()?;
        if number >= 1 && (number as u64) <= page_len as u64 {
            return Some(BrowseCommand::Select(number as usize));
        }
        match number {
            SEE_MORE => Some(BrowseCommand::SeeMore),
            GO_BACK => Some(BrowseCommand::GoBack),
            BACK_TO_MENU => Some(BrowseCommand::MainMenu),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_numbers() {
        assert_eq!(Input::parse(" 3\n"), Input::Number(3));
        assert_eq!(Input::parse("-1"), Input::Number(-1));
    }

    #[test]
    fn parse_keeps_text() {
        assert_eq!(Input::parse(" oi "), Input::Text("oi".into()));
        assert_eq!(Input::parse("3a"), Input::Text("3a".into()));
        assert_eq!(Input::parse(""), Input::Text(String::new()));
    }

    #[test]
    fn browse_selects_within_page() {
        let input = Input::Number(3);
        assert_eq!(
            BrowseCommand::from_input(&input, 5),
            Some(BrowseCommand::Select(3))
        );
    }

    #[test]
    fn browse_rejects_selection_beyond_short_page() {
        assert_eq!(BrowseCommand::from_input(&Input::Number(4), 3), None);
    }

    #[test]
    fn browse_recognises_sentinels() {
        assert_eq!(
            BrowseCommand::from_input(&Input::Number(6), 5),
            Some(BrowseCommand::SeeMore)
        );
        assert_eq!(
            BrowseCommand::from_input(&Input::Number(7), 5),
            Some(BrowseCommand::GoBack)
        );
        assert_eq!(
            BrowseCommand::from_input(&Input::Number(0), 5),
            Some(BrowseCommand::MainMenu)
        );
    }

    #[test]
    fn browse_rejects_text_and_unknown_numbers() {
        assert_eq!(BrowseCommand::from_input(&Input::parse("mais"), 5), None);
        assert_eq!(BrowseCommand::from_input(&Input::Number(8), 5), None);
        assert_eq!(BrowseCommand::from_input(&Input::Number(-2), 5), None);
    }
}
