/// Which row of the filtered list has keyboard focus.
///
/// Every move takes the current list length as an argument; nothing here
/// caches bounds between keypresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    focused: Option<usize>,
}

impl Selection {
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// Down: unfocused goes to the first row, otherwise one row down, clamped
    pub fn down(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            self.focused = None;
            return None;
        }
        let next = match self.focused {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        };
        self.focused = Some(next);
        self.focused
    }

    /// Up: unfocused goes to the last row, otherwise one row up, clamped
    pub fn up(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            self.focused = None;
            return None;
        }
        let next = match self.focused {
            None => len - 1,
            Some(i) => i.saturating_sub(1).min(len - 1),
        };
        self.focused = Some(next);
        self.focused
    }

    /// Step by `delta` from the focused row. Stepping outside the list is a
    /// no-op and returns None.
    pub fn step(&mut self, delta: isize, len: usize) -> Option<usize> {
        let current = self.focused?;
        let target = current.checked_add_signed(delta)?;
        if target >= len {
            return None;
        }
        self.focused = Some(target);
        self.focused
    }

    /// Focus a row directly (mouse click). Out-of-range rows are ignored.
    pub fn focus(&mut self, index: usize, len: usize) -> Option<usize> {
        if index >= len {
            return None;
        }
        self.focused = Some(index);
        self.focused
    }

    pub fn first(&mut self, len: usize) -> Option<usize> {
        self.focused = if len == 0 { None } else { Some(0) };
        self.focused
    }

    pub fn last(&mut self, len: usize) -> Option<usize> {
        self.focused = len.checked_sub(1);
        self.focused
    }

    /// Drop focus when the list no longer holds the focused row
    pub fn reconcile(&mut self, len: usize) {
        if self.focused.is_some_and(|i| i >= len) {
            self.focused = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_from_unfocused_starts_at_top() {
        let mut sel = Selection::default();
        assert_eq!(sel.down(5), Some(0));
        assert_eq!(sel.down(5), Some(1));
    }

    #[test]
    fn up_from_unfocused_starts_at_bottom() {
        let mut sel = Selection::default();
        assert_eq!(sel.up(5), Some(4));
        assert_eq!(sel.up(5), Some(3));
    }

    #[test]
    fn repeated_down_clamps_at_last_row() {
        let mut sel = Selection::default();
        for _ in 0..5 {
            sel.down(5);
        }
        assert_eq!(sel.focused(), Some(4));
        assert_eq!(sel.down(5), Some(4));
        assert_eq!(sel.down(5), Some(4));
    }

    #[test]
    fn up_clamps_at_first_row() {
        let mut sel = Selection::default();
        sel.down(3);
        assert_eq!(sel.up(3), Some(0));
        assert_eq!(sel.up(3), Some(0));
    }

    #[test]
    fn moves_on_empty_list_unfocus() {
        let mut sel = Selection::default();
        sel.down(3);
        assert_eq!(sel.down(0), None);
        assert_eq!(sel.focused(), None);
        assert_eq!(sel.up(0), None);
    }

    #[test]
    fn bounds_follow_the_current_length() {
        let mut sel = Selection::default();
        sel.last(10);
        // The list shrank since the last keypress
        assert_eq!(sel.down(4), Some(3));
        assert_eq!(sel.up(4), Some(2));
    }

    #[test]
    fn step_outside_bounds_is_noop() {
        let mut sel = Selection::default();
        assert_eq!(sel.step(1, 3), None);
        sel.focus(0, 3);
        assert_eq!(sel.step(-1, 3), None);
        assert_eq!(sel.focused(), Some(0));
        assert_eq!(sel.step(1, 3), Some(1));
        assert_eq!(sel.step(1, 3), Some(2));
        assert_eq!(sel.step(1, 3), None);
        assert_eq!(sel.focused(), Some(2));
    }

    #[test]
    fn focus_ignores_out_of_range() {
        let mut sel = Selection::default();
        assert_eq!(sel.focus(7, 3), None);
        assert_eq!(sel.focused(), None);
        assert_eq!(sel.focus(2, 3), Some(2));
    }

    #[test]
    fn reconcile_drops_stale_focus() {
        let mut sel = Selection::default();
        sel.focus(4, 5);
        sel.reconcile(5);
        assert_eq!(sel.focused(), Some(4));
        sel.reconcile(4);
        assert_eq!(sel.focused(), None);
    }

    #[test]
    fn first_and_last() {
        let mut sel = Selection::default();
        assert_eq!(sel.last(0), None);
        assert_eq!(sel.first(0), None);
        assert_eq!(sel.last(3), Some(2));
        assert_eq!(sel.first(3), Some(0));
    }
}
