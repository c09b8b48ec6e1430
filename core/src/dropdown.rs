//! Keyboard state for the autocomplete dropdown.
//!
//! Pure state machine: `hidden` or `open(items, active)`. The UI layer
//! owns focus, scrolling and the blur-delay; everything observable from
//! the keyboard contract lives here.

use crate::autocomplete::DropdownItem;

#[derive(Debug, Clone, Default)]
pub struct DropdownState {
    items: Vec<DropdownItem>,
    active: Option<usize>,
}

impl DropdownState {
    /// Open with a fresh item list; the active cursor resets.
    /// An empty list keeps the dropdown closed.
    pub fn open(&mut self, items: Vec<DropdownItem>) {
        self.items = items;
        self.active = None;
    }

    pub fn close(&mut self) {
        self.items.clear();
        self.active = None;
    }

    pub fn is_open(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn items(&self) -> &[DropdownItem] {
        &self.items
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&DropdownItem> {
        self.active.and_then(|i| self.items.get(i))
    }

    /// ArrowDown: advance the cursor, wrapping past the end. No-op when
    /// the dropdown is empty.
    pub fn step_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.active = Some(match self.active {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        });
    }

    /// ArrowUp: move the cursor back, wrapping to the last item.
    pub fn step_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        self.active = Some(match self.active {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::SuggestSection;

    fn items(n: usize) -> Vec<DropdownItem> {
        (0..n)
            .map(|i| DropdownItem {
                label: format!("item {i}"),
                count: 1,
                section: SuggestSection::Topic,
            })
            .collect()
    }

    #[test]
    fn starts_hidden_with_no_cursor() {
        let d = DropdownState::default();
        assert!(!d.is_open());
        assert!(d.active_item().is_none());
    }

    #[test]
    fn down_and_up_rotate_modulo_length() {
        let mut d = DropdownState::default();
        d.open(items(3));
        d.step_down();
        assert_eq!(d.active_index(), Some(0));
        d.step_down();
        d.step_down();
        assert_eq!(d.active_index(), Some(2));
        d.step_down();
        assert_eq!(d.active_index(), Some(0));
        d.step_up();
        assert_eq!(d.active_index(), Some(2));
    }

    #[test]
    fn up_from_rest_position_lands_on_last() {
        let mut d = DropdownState::default();
        d.open(items(2));
        d.step_up();
        assert_eq!(d.active_index(), Some(1));
    }

    #[test]
    fn empty_dropdown_ignores_steps() {
        let mut d = DropdownState::default();
        d.step_down();
        d.step_up();
        assert!(d.active_index().is_none());
        d.open(Vec::new());
        assert!(!d.is_open());
    }

    #[test]
    fn reopen_resets_cursor() {
        let mut d = DropdownState::default();
        d.open(items(3));
        d.step_down();
        d.open(items(2));
        assert!(d.active_index().is_none());
        assert_eq!(d.active_item(), None);
        d.step_down();
        assert_eq!(d.active_item().unwrap().label, "item 0");
    }

    #[test]
    fn close_discards_items() {
        let mut d = DropdownState::default();
        d.open(items(1));
        d.close();
        assert!(!d.is_open());
        assert!(d.items().is_empty());
    }
}
