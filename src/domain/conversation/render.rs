//! Composition of outbound text from catalog strings.
//!
//! Pure functions: no I/O, no session mutation. Wording comes from
//! [`Texts`]; this module only decides layout and numbering.

use crate::domain::catalog::{MenuEntry, Texts};
use crate::domain::place::{Category, Item, Page, PageWindow};

use super::outbound::{MediaAttachment, Outbound};

/// Most photos sent with an item detail.
pub const MAX_PHOTOS: usize = 2;

/// The main menu: header followed by one numbered line per entry.
pub fn main_menu(texts: &Texts, menu: &[MenuEntry]) -> String {
    let mut lines = vec![texts.main_menu_header.clone()];
    lines.extend(
        menu.iter()
            .map(|entry| format!("{} - {}", entry.option_number, entry.description)),
    );
    lines.join("\n")
}

/// Paging and navigation options available for a window.
fn navigation_lines(texts: &Texts, window: &PageWindow) -> Vec<String> {
    let mut lines = Vec::new();
    if window.has_next() {
        lines.push(texts.see_more_option.clone());
    }
    if window.has_previous() {
        lines.push(texts.go_back_option.clone());
    }
    lines.push(texts.main_menu_option.clone());
    lines
}

/// A numbered category listing with its navigation footer.
///
/// Numbering is 1-based and matches the order of `page.items`.
pub fn category_list(texts: &Texts, category: Category, page: &Page) -> String {
    if page.is_empty() {
        let mut lines = vec![texts.item_not_found.clone()];
        lines.extend(navigation_lines(texts, &page.window));
        return lines.join("\n");
    }

    let mut lines = vec![texts.list_header_for(category)];
    lines.extend(
        page.items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("{} - {}", index + 1, item.name)),
    );
    lines.push(String::new());
    lines.push(texts.choose_item_hint.clone());
    lines.extend(navigation_lines(texts, &page.window));
    lines.join("\n")
}

fn detail_text(texts: &Texts, item: &Item, window: &PageWindow) -> String {
    let mut lines = vec![format!("*{}*", item.name)];
    if !item.address.is_empty() {
        lines.push(format!("{}: {}", texts.address_label, item.address));
    }
    if let Some(phone) = item.phone_number.as_deref().filter(|p| !p.is_empty()) {
        lines.push(format!("{}: {}", texts.phone_label, phone));
    }
    if let Some(rating) = item.rating {
        let line = match item.rating_count {
            Some(count) => format!(
                "{}: {:.1} ({} {})",
                texts.rating_label, rating, count, texts.reviews_label
            ),
            None => format!("{}: {:.1}", texts.rating_label, rating),
        };
        lines.push(line);
    }
    if let Some(coordinates) = item.coordinates {
        lines.push(format!("{}: {}", texts.map_label, coordinates.map_link()));
    }
    lines.push(String::new());
    lines.push(texts.choose_item_hint.clone());
    lines.extend(navigation_lines(texts, window));
    lines.join("\n")
}

/// An item detail: one text block followed by up to [`MAX_PHOTOS`] photos.
pub fn item_detail(texts: &Texts, item: &Item, window: &PageWindow) -> Vec<Outbound> {
    let mut messages = vec![Outbound::Text(detail_text(texts, item, window))];
    messages.extend(
        item.photo_urls
            .iter()
            .filter(|url| !url.trim().is_empty())
            .take(MAX_PHOTOS)
            .map(|url| {
                Outbound::Media(MediaAttachment::from_url(url.clone()).with_caption(item.name.clone()))
            }),
    );
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::place::Coordinates;

    fn texts() -> Texts {
        Texts {
            language_menu: "lang".into(),
            welcome: "Hi {name}".into(),
            main_menu_header: "Main menu".into(),
            invalid_option: "Invalid option".into(),
            item_not_found: "Nothing here".into(),
            feedback_prompt: "Rate 1-5".into(),
            feedback_confirmation: "Thanks".into(),
            generic_error: "Try later".into(),
            goodbye: "Bye".into(),
            list_header: "Best {category}:".into(),
            choose_item_hint: "Type a number for details".into(),
            see_more_option: "6 - See more".into(),
            go_back_option: "7 - Go back".into(),
            main_menu_option: "0 - Main menu".into(),
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

    fn page(offset: u32, total: u64, names: &[&str]) -> Page {
        Page::new(
            PageWindow {
                offset,
                size: 5,
                total,
            },
            names.iter().map(|n| Item::named(*n)).collect(),
        )
    }

    #[test]
    fn main_menu_numbers_entries() {
        let menu = vec![MenuEntry::new(1, "Hotels"), MenuEntry::new(0, "Exit")];
        assert_eq!(main_menu(&texts(), &menu), "Main menu\n1 - Hotels\n0 - Exit");
    }

    #[test]
    fn first_page_offers_see_more_but_not_go_back() {
        let list = category_list(
            &texts(),
            Category::Restaurant,
            &page(0, 8, &["A", "B", "C", "D", "E"]),
        );
        assert!(list.starts_with("Best restaurants:\n1 - A\n2 - B"));
        assert!(list.contains("5 - E"));
        assert!(list.contains("6 - See more"));
        assert!(!list.contains("7 - Go back"));
        assert!(list.ends_with("0 - Main menu"));
    }

    #[test]
    fn last_page_offers_go_back_only() {
        let list = category_list(&texts(), Category::Hotel, &page(5, 8, &["F", "G", "H"]));
        assert!(list.contains("1 - F"));
        assert!(!list.contains("6 - See more"));
        assert!(list.contains("7 - Go back"));
    }

    #[test]
    fn empty_category_reports_not_found() {
        let list = category_list(&texts(), Category::Attraction, &page(0, 0, &[]));
        assert_eq!(list, "Nothing here\n0 - Main menu");
    }

    #[test]
    fn detail_includes_fields_and_photos() {
        let mut item = Item::named("Forte Junqueira");
        item.address = "Rua Cuiaba".into();
        item.phone_number = Some("(67) 3231-0000".into());
        item.rating = Some(4.6);
        item.rating_count = Some(812);
        item.coordinates = Some(Coordinates::new(-19.0, -57.65));
        item.photo_urls = vec!["u1".into(), "u2".into(), "u3".into()];

        let messages = item_detail(&texts(), &item, &PageWindow::first(5, 3));

        let text = messages[0].as_text().unwrap();
        assert!(text.starts_with("*Forte Junqueira*"));
        assert!(text.contains("Address: Rua Cuiaba"));
        assert!(text.contains("Phone: (67) 3231-0000"));
        assert!(text.contains("Rating: 4.6 (812 reviews)"));
        assert!(text.contains("Map: https://www.google.com/maps/search/?api=1&query=-19,-57.65"));
        assert_eq!(messages.len(), 1 + MAX_PHOTOS);
        assert_eq!(
            messages[1],
            Outbound::Media(MediaAttachment::from_url("u1").with_caption("Forte Junqueira"))
        );
    }

    #[test]
    fn detail_without_optional_fields_is_just_name_and_footer() {
        let messages = item_detail(&texts(), &Item::named("Porto"), &PageWindow::first(5, 1));
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].as_text().unwrap(),
            "*Porto*\n\nType a number for details\n0 - Main menu"
        );
    }
}
