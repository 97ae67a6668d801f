//! A check box that enables a colour picker, a label echoing the choice and
//! a button that rebuilds the lower row with the other orientation.

use crate::edit::{Edit, Side};
use crate::state::Transition;
use crate::widget::{Orientation, Widget};

const COLOURS: &[&str] = &["red", "green", "blue"];

const ENABLE: &[Side] = &[Side::Left, Side::Left];
const PICKER: &[Side] = &[Side::Left, Side::Right];
const LOWER: &[Side] = &[Side::Right];
const FLIP: &[Side] = &[Side::Right, Side::Right];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    enabled: bool,
    selected: usize,
    orientation: Orientation,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            enabled: false,
            selected: 0,
            orientation: Orientation::Horizontal,
        }
    }
}

fn caption(selected: usize) -> String {
    format!("Selected: {}", COLOURS[selected])
}

fn lower_row(orientation: Orientation, selected: usize) -> Widget {
    Widget::container(
        orientation,
        Widget::label(caption(selected)),
        Widget::button("Flip"),
    )
}

impl Panel {
    pub fn widget() -> Widget {
        let state = Panel::default();
        Widget::vbox(
            Widget::hbox(
                Widget::checkbox(state.enabled),
                Widget::combo(COLOURS.iter().copied(), state.selected).disabled(),
            ),
            lower_row(state.orientation, state.selected),
        )
    }
}

impl Transition for Panel {
    fn transition(mut self, input: Edit) -> (Option<Edit>, Self) {
        let (path, action) = input.split_path();
        match (path.as_slice(), action) {
            // The check box already shows its new state; only the picker follows.
            (ENABLE, Edit::ToggleChecked) => {
                self.enabled = !self.enabled;
                (Some(Edit::at(PICKER, Edit::ToggleEnabled)), self)
            }
            (PICKER, Edit::SetSelection(index)) if index < COLOURS.len() => {
                if index == self.selected {
                    return (None, self);
                }
                self.selected = index;
                let label = Edit::at(LOWER, Edit::ModifyLeft(Box::new(Edit::SetLabel(caption(index)))));
                (Some(label), self)
            }
            (FLIP, Edit::Click) => {
                self.orientation = self.orientation.flipped();
                let rebuilt = Edit::ReplaceBy(lower_row(self.orientation, self.selected));
                (Some(Edit::at(LOWER, rebuilt)), self)
            }
            _ => (None, self),
        }
    }
}
