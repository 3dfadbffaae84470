//! Page arithmetic over a category's result set.

use serde::{Deserialize, Serialize};

use super::Item;

/// Direction of a pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    Forward,
    Back,
}

/// Position of a page within a category: offset, size and total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub offset: u32,
    pub size: u32,
    pub total: u64,
}

impl PageWindow {
    /// The first page of a category.
    pub fn first(size: u32, total: u64) -> Self {
        Self {
            offset: 0,
            size,
            total,
        }
    }

    /// True when a further page exists.
    pub fn has_next(&self) -> bool {
        (self.offset as u64 + self.size as u64) < self.total
    }

    /// True when a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    /// The window after applying a move, or `None` when the move is not
    /// available from here. Offsets stay multiples of the page size.
    pub fn apply(&self, movement: PageMove) -> Option<Self> {
        match movement {
            PageMove::Forward if self.has_next() => Some(Self {
                offset: self.offset + self.size,
                ..*self
            }),
            PageMove::Back if self.has_previous() => Some(Self {
                offset: self.offset.saturating_sub(self.size),
                ..*self
            }),
            _ => None,
        }
    }

    /// Pull the offset back onto the last page when the category shrank
    /// below it. An empty category clamps to offset 0.
    pub fn clamped(&self) -> Self {
        if (self.offset as u64) < self.total {
            return *self;
        }
        if self.total == 0 || self.size == 0 {
            return Self { offset: 0, ..*self };
        }
        let size = self.size as u64;
        let last_start = ((self.total - 1) / size) * size;
        Self {
            offset: last_start as u32,
            ..*self
        }
    }
}

/// A bounded slice of a category, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub window: PageWindow,
    pub items: Vec<Item>,
}

impl Page {
    pub fn new(window: PageWindow, items: Vec<Item>) -> Self {
        Self { window, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolves a 1-based selection against the displayed items.
    pub fn select(&self, choice: i64) -> Option<&Item> {
        if choice < 1 {
            return None;
        }
        self.items.get((choice - 1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_pulls_offset_onto_last_page() {
        let window = PageWindow { offset: 10, size: 5, total: 7 };
        assert_eq!(window.clamped().offset, 5);

        let empty = PageWindow { offset: 5, size: 5, total: 0 };
        assert_eq!(empty.clamped().offset, 0);

        let inside = PageWindow { offset: 5, size: 5, total: 12 };
        assert_eq!(inside.clamped(), inside);
    }

    #[test]
    fn forward_advances_by_page_size() {
        let window = PageWindow::first(5, 12);
        let next = window.apply(PageMove::Forward).unwrap();
        assert_eq!(next.offset, 5);
        let last = next.apply(PageMove::Forward).unwrap();
        assert_eq!(last.offset, 10);
        assert_eq!(last.apply(PageMove::Forward), None);
    }

    #[test]
    fn back_is_unavailable_on_first_page() {
        assert_eq!(PageWindow::first(5, 12).apply(PageMove::Back), None);
    }

    #[test]
    fn back_regresses_by_page_size() {
        let window = PageWindow {
            offset: 10,
            size: 5,
            total: 12,
        };
        assert_eq!(window.apply(PageMove::Back).unwrap().offset, 5);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_page() {
        let window = PageWindow {
            offset: 5,
            size: 5,
            total: 10,
        };
        assert!(!window.has_next());
    }

    #[test]
    fn select_is_one_based() {
        let items = ["A", "B", "C", "D", "E"].map(Item::named).to_vec();
        let page = Page::new(PageWindow::first(5, 5), items);
        assert_eq!(page.select(3).unwrap().name, "C");
        assert_eq!(page.select(1).unwrap().name, "A");
        assert!(page.select(0).is_none());
        assert!(page.select(6).is_none());
    }
}
