//! A counter with increment, decrement and a reset that is only enabled
//! while the count is non-zero.

use crate::edit::{Edit, Side};
use crate::state::Transition;
use crate::widget::Widget;

const VALUE: &[Side] = &[Side::Left];
const DECREMENT: &[Side] = &[Side::Right, Side::Left, Side::Left];
const INCREMENT: &[Side] = &[Side::Right, Side::Left, Side::Right];
const RESET: &[Side] = &[Side::Right, Side::Right];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    count: i64,
}

impl Counter {
    pub fn widget() -> Widget {
        Widget::vbox(
            Widget::label("0"),
            Widget::hbox(
                Widget::hbox(Widget::button("-"), Widget::button("+")),
                Widget::button("Reset").disabled(),
            ),
        )
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    fn set(self, count: i64) -> (Option<Edit>, Self) {
        if count == self.count {
            return (None, self);
        }
        let mut edit = Edit::at(VALUE, Edit::SetLabel(count.to_string()));
        // Reset is enabled exactly while the count is non-zero.
        if (self.count == 0) != (count == 0) {
            edit = edit.then(Edit::at(RESET, Edit::ToggleEnabled));
        }
        (Some(edit), Counter { count })
    }
}

impl Transition for Counter {
    fn transition(self, input: Edit) -> (Option<Edit>, Self) {
        let (path, action) = input.split_path();
        match (path.as_slice(), action) {
            (DECREMENT, Edit::Click) => self.set(self.count - 1),
            (INCREMENT, Edit::Click) => self.set(self.count + 1),
            (RESET, Edit::Click) => self.set(0),
            (other, action) => {
                tracing::debug!(path = ?other, ?action, "counter ignored action");
                (None, self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_increment_enables_reset() {
        let (out, next) = Counter::default().transition(Edit::at(INCREMENT, Edit::Click));
        assert_eq!(next.count(), 1);
        assert_eq!(
            out,
            Some(
                Edit::at(VALUE, Edit::SetLabel("1".into()))
                    .then(Edit::at(RESET, Edit::ToggleEnabled))
            )
        );
    }

    #[test]
    fn second_increment_only_relabels() {
        let (_, one) = Counter::default().transition(Edit::at(INCREMENT, Edit::Click));
        let (out, two) = one.transition(Edit::at(INCREMENT, Edit::Click));
        assert_eq!(two.count(), 2);
        assert_eq!(out, Some(Edit::at(VALUE, Edit::SetLabel("2".into()))));
    }

    #[test]
    fn reset_at_zero_does_nothing() {
        let (out, next) = Counter::default().transition(Edit::at(RESET, Edit::Click));
        assert!(out.is_none());
        assert_eq!(next.count(), 0);
    }

    #[test]
    fn unknown_paths_are_ignored() {
        let (out, _) = Counter::default().transition(Edit::at(VALUE, Edit::Click));
        assert!(out.is_none());
    }
}
