//! Localized system strings.

use serde::{Deserialize, Serialize};

use crate::domain::place::Category;

/// Placeholder replaced by the contact's display name in the welcome text.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Placeholder replaced by the category name in list headers.
pub const CATEGORY_PLACEHOLDER: &str = "{category}";

/// Every string the conversation sends, for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texts {
    pub language_menu: String,
    /// Templated with [`NAME_PLACEHOLDER`].
    pub welcome: String,
    pub main_menu_header: String,
    pub invalid_option: String,
    pub item_not_found: String,
    pub feedback_prompt: String,
    pub feedback_confirmation: String,
    pub generic_error: String,
    pub goodbye: String,
    /// Templated with [`CATEGORY_PLACEHOLDER`].
    pub list_header: String,
    pub choose_item_hint: String,
    pub see_more_option: String,
    pub go_back_option: String,
    pub main_menu_option: String,
    pub address_label: String,
    pub phone_label: String,
    pub rating_label: String,
    pub reviews_label: String,
    pub map_label: String,
    pub hotels: String,
    pub restaurants: String,
    pub attractions: String,
}

impl Texts {
    /// Welcome text addressed to the contact.
    ///
    /// Falls back to an empty name when the channel gave none.
    pub fn welcome_for(&self, display_name: Option<&str>) -> String {
        let name = display_name.map(str::trim).unwrap_or_default();
        self.welcome.replace(NAME_PLACEHOLDER, name)
    }

    /// Localized plural name of a category.
    pub fn category_name(&self, category: Category) -> &str {
        match category {
            Category::Hotel => &self.hotels,
            Category::Restaurant => &self.restaurants,
            Category::Attraction => &self.attractions,
        }
    }

    /// Header line of a category listing.
    pub fn list_header_for(&self, category: Category) -> String {
        self.list_header
            .replace(CATEGORY_PLACEHOLDER, self.category_name(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Texts {
        Texts {
            language_menu: "lang".into(),
            welcome: "Hello, {name}!".into(),
            main_menu_header: "Menu".into(),
            invalid_option: "invalid".into(),
            item_not_found: "none".into(),
            feedback_prompt: "rate".into(),
            feedback_confirmation: "thanks".into(),
            generic_error: "error".into(),
            goodbye: "bye".into(),
            list_header: "Top {category}".into(),
            choose_item_hint: "pick".into(),
            see_more_option: "6 - more".into(),
            go_back_option: "7 - back".into(),
            main_menu_option: "0 - menu".into(),
            address_label: "Address".into(),
            phone_label: "Phone".into(),
            rating_label: "Rating".into(),
            reviews_label: "reviews".into(),
            map_label: "Map".into(),
            hotels: "hotels".into(),
            restaurants: "restaurants".into(),
            attractions: "attractions".into(),
        }
    }

    #[test]
    fn welcome_substitutes_display_name() {
        assert_eq!(sample().welcome_for(Some(" Ana ")), "Hello, Ana!");
        assert_eq!(sample().welcome_for(None), "Hello, !");
    }

    #[test]
    fn list_header_uses_category_name() {
        assert_eq!(
            sample().list_header_for(Category::Restaurant),
            "Top restaurants"
        );
    }
}
