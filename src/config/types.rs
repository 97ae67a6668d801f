use serde::{Deserialize, Serialize};

use crate::update::Diagnostics;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Diagnostics emitted by the updater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Warn when an edit sets a value the user can already see (default: true).
    #[serde(default = "default_true")]
    pub redundant_update_warnings: bool,
    /// Log every subtree replacement (default: false).
    #[serde(default)]
    pub replace_warnings: bool,
}

/// Terminal host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw interval in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Demo application started when none is given on the command line.
    #[serde(default = "default_app")]
    pub app: String,
    /// Draw a border around every container (default: false).
    #[serde(default)]
    pub outline: bool,
}

fn default_true() -> bool {
    true
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_app() -> String {
    "counter".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            redundant_update_warnings: default_true(),
            replace_warnings: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            app: default_app(),
            outline: false,
        }
    }
}

impl RuntimeConfig {
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            redundant_updates: self.redundant_update_warnings,
            replacements: self.replace_warnings,
        }
    }
}
