//! The boundary with application logic.
//!
//! The runtime never looks inside application state. It only calls
//! [`ApplicationState::step`], which consumes the current state and hands back
//! an optional output edit together with the state for the next action.
//!
//! ```text
//! Action ──→ route ──→ step ──→ (output, next)
//!                                   │      │
//!                          apply ◄──┘      └──→ installed for next action
//! ```

use crate::edit::Edit;
use crate::widget::Widget;

/// Output of one step: the edit to apply (if any) and the next state.
pub type Step = (Option<Edit>, Box<dyn ApplicationState>);

/// A one-shot continuation. Each value is stepped at most once.
///
/// `input` is a root-relative edit. `None` means "no user action" and must
/// be answered with `(None, state)`.
pub trait ApplicationState {
    fn step(self: Box<Self>, input: Option<Edit>) -> Step;
}

/// Entry point of an application: the initial widget and the initial state.
pub trait Application {
    fn start(self) -> (Widget, Box<dyn ApplicationState>);
}

impl<F> Application for F
where
    F: FnOnce() -> (Widget, Box<dyn ApplicationState>),
{
    fn start(self) -> (Widget, Box<dyn ApplicationState>) {
        self()
    }
}

/// Application state written as a closure over the next action.
pub struct Continuation {
    next: Box<dyn FnOnce(Option<Edit>) -> Step>,
}

impl Continuation {
    pub fn new(next: impl FnOnce(Option<Edit>) -> Step + 'static) -> Self {
        Self {
            next: Box::new(next),
        }
    }

    pub fn boxed(next: impl FnOnce(Option<Edit>) -> Step + 'static) -> Box<dyn ApplicationState> {
        Box::new(Self::new(next))
    }
}

impl ApplicationState for Continuation {
    fn step(self: Box<Self>, input: Option<Edit>) -> Step {
        (self.next)(input)
    }
}

/// State that ignores every action and never changes the tree.
pub struct Inert;

impl ApplicationState for Inert {
    fn step(self: Box<Self>, _input: Option<Edit>) -> Step {
        (None, self)
    }
}

/// Application logic as an explicit state value plus a transition function.
///
/// The transition consumes the state and must be free of side effects
/// besides building the result.
pub trait Transition: Sized + 'static {
    fn transition(self, input: Edit) -> (Option<Edit>, Self);
}

/// Adapts a [`Transition`] to the [`ApplicationState`] contract.
pub struct Machine<T>(pub T);

impl<T: Transition> Machine<T> {
    pub fn boxed(state: T) -> Box<dyn ApplicationState> {
        Box::new(Machine(state))
    }
}

impl<T: Transition> ApplicationState for Machine<T> {
    fn step(self: Box<Self>, input: Option<Edit>) -> Step {
        match input {
            None => (None, self),
            Some(edit) => {
                let (output, next) = self.0.transition(edit);
                (output, Box::new(Machine(next)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Count(u32);

    impl Transition for Count {
        fn transition(self, input: Edit) -> (Option<Edit>, Self) {
            match input {
                Edit::Click => (Some(Edit::SetLabel((self.0 + 1).to_string())), Count(self.0 + 1)),
                _ => (None, self),
            }
        }
    }

    #[test]
    fn machine_answers_none_with_none() {
        let state = Machine::boxed(Count(0));
        let (out, state) = state.step(None);
        assert!(out.is_none());
        let (out, _) = state.step(Some(Edit::Click));
        assert_eq!(out, Some(Edit::SetLabel("1".into())));
    }

    #[test]
    fn machine_threads_state() {
        let mut state = Machine::boxed(Count(0));
        let mut last = None;
        for _ in 0..3 {
            let (out, next) = state.step(Some(Edit::Click));
            last = out;
            state = next;
        }
        assert_eq!(last, Some(Edit::SetLabel("3".into())));
    }

    #[test]
    fn continuation_runs_closure_once() {
        let state = Continuation::boxed(|input| {
            assert_eq!(input, Some(Edit::ToggleChecked));
            (Some(Edit::NoOp), Box::new(Inert))
        });
        let (out, next) = state.step(Some(Edit::ToggleChecked));
        assert_eq!(out, Some(Edit::NoOp));
        let (out, _) = next.step(Some(Edit::Click));
        assert!(out.is_none());
    }

    #[test]
    fn closures_are_applications() {
        let app = || -> (Widget, Box<dyn ApplicationState>) { (Widget::Empty, Box::new(Inert)) };
        let (widget, _) = app.start();
        assert_eq!(widget, Widget::Empty);
    }
}
