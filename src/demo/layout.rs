//! A static layout loaded from JSON.
//!
//! Its state never answers with an edit; every routed action is logged as
//! JSON instead, which makes it a probe for the routing protocol.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::edit::Edit;
use crate::state::{Application, ApplicationState, Machine, Transition};
use crate::widget::{Widget, WidgetError};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to read layout file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse layout file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Layout file '{path}' describes an invalid widget: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: WidgetError,
    },
}

pub struct StaticLayout {
    widget: Widget,
}

impl StaticLayout {
    pub fn new(widget: Widget) -> Self {
        Self { widget }
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let content = fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|err| match err {
            ParseFailure::Json(source) => LayoutError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Invalid(source) => LayoutError::Invalid {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    fn parse(content: &str) -> Result<Self, ParseFailure> {
        let widget: Widget = serde_json::from_str(content).map_err(ParseFailure::Json)?;
        widget.validate().map_err(ParseFailure::Invalid)?;
        Ok(Self::new(widget))
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }
}

enum ParseFailure {
    Json(serde_json::Error),
    Invalid(WidgetError),
}

/// Logs each routed action and leaves the tree alone.
struct Probe;

impl Transition for Probe {
    fn transition(self, input: Edit) -> (Option<Edit>, Self) {
        match serde_json::to_string(&input) {
            Ok(json) => tracing::info!(edit = %json, "routed action"),
            Err(err) => tracing::warn!(error = %err, "failed to encode routed action"),
        }
        (None, self)
    }
}

impl Application for StaticLayout {
    fn start(self) -> (Widget, Box<dyn ApplicationState>) {
        (self.widget, Machine::boxed(Probe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_json() {
        let json = r#"{
            "kind": "container",
            "orientation": "vertical",
            "left": { "kind": "label", "text": "hi" },
            "right": { "kind": "button", "enabled": true, "label": "Go" }
        }"#;
        let layout = StaticLayout::parse(json).ok().unwrap();
        assert_eq!(
            layout.widget(),
            &Widget::vbox(Widget::label("hi"), Widget::button("Go"))
        );
    }

    #[test]
    fn rejects_invalid_selection() {
        let json = r#"{ "kind": "combo_box", "enabled": true, "options": ["a"], "selected": 1 }"#;
        assert!(matches!(
            StaticLayout::parse(json),
            Err(ParseFailure::Invalid(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = StaticLayout::load(Path::new("/definitely/not/here.json"))
            .err()
            .unwrap();
        assert!(matches!(err, LayoutError::Read { .. }));
    }

    #[test]
    fn probe_never_edits() {
        let (_, state) = StaticLayout::new(Widget::button("x")).start();
        let (out, _) = state.step(Some(Edit::Click));
        assert!(out.is_none());
    }
}
