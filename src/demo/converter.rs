//! Celsius ⇄ Fahrenheit converter.
//!
//! Typing into either entry rewrites the other one. Text that does not parse
//! as a number marks its entry invalid until it parses again.

use crate::edit::{Edit, Side};
use crate::state::Transition;
use crate::widget::Widget;

const CELSIUS: &[Side] = &[Side::Left, Side::Right];
const FAHRENHEIT: &[Side] = &[Side::Right, Side::Right];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    celsius_valid: bool,
    fahrenheit_valid: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            celsius_valid: true,
            fahrenheit_valid: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Scale {
    Celsius,
    Fahrenheit,
}

impl Converter {
    pub fn widget() -> Widget {
        Widget::vbox(
            Widget::hbox(Widget::label("Celsius   "), Widget::entry(10, "celsius", "0")),
            Widget::hbox(Widget::label("Fahrenheit"), Widget::entry(10, "fahrenheit", "32")),
        )
    }

    pub fn is_valid(&self) -> bool {
        self.celsius_valid && self.fahrenheit_valid
    }

    fn typed(mut self, scale: Scale, text: &str) -> (Option<Edit>, Self) {
        let (source, target) = match scale {
            Scale::Celsius => (CELSIUS, FAHRENHEIT),
            Scale::Fahrenheit => (FAHRENHEIT, CELSIUS),
        };
        let (source_valid, target_valid) = match scale {
            Scale::Celsius => (self.celsius_valid, self.fahrenheit_valid),
            Scale::Fahrenheit => (self.fahrenheit_valid, self.celsius_valid),
        };

        let mut edits = Vec::new();
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                let converted = match scale {
                    Scale::Celsius => value * 9.0 / 5.0 + 32.0,
                    Scale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
                };
                edits.push(Edit::at(target, Edit::SetEntryContent(format_number(converted))));
                if !source_valid {
                    edits.push(Edit::at(source, Edit::ToggleValidity));
                }
                if !target_valid {
                    edits.push(Edit::at(target, Edit::ToggleValidity));
                }
                self.celsius_valid = true;
                self.fahrenheit_valid = true;
            }
            _ => {
                if source_valid {
                    edits.push(Edit::at(source, Edit::ToggleValidity));
                }
                match scale {
                    Scale::Celsius => self.celsius_valid = false,
                    Scale::Fahrenheit => self.fahrenheit_valid = false,
                }
            }
        }

        let edit = Edit::sequence(edits);
        if edit.is_noop() {
            (None, self)
        } else {
            (Some(edit), self)
        }
    }
}

/// Two decimals at most, no trailing zeros.
fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

impl Transition for Converter {
    fn transition(self, input: Edit) -> (Option<Edit>, Self) {
        let (path, action) = input.split_path();
        match (path.as_slice(), action) {
            (CELSIUS, Edit::SetEntryContent(text)) => self.typed(Scale::Celsius, &text),
            (FAHRENHEIT, Edit::SetEntryContent(text)) => self.typed(Scale::Fahrenheit, &text),
            _ => (None, self),
        }
    }
}
