//! Settings schema. Keys in `settings.json` are camelCase.

use serde::{Deserialize, Serialize};

/// Which task view the CLI opens by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Flat paginated list.
    List,
    /// Kanban board.
    #[default]
    Board,
}

/// Remote API configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    /// Base URL of the tasks API. No compiled default — unset is a
    /// fatal configuration error surfaced by the client.
    pub base_url: Option<String>,
}

/// Presentation defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiSettings {
    /// Page size for list queries.
    pub page_size: u32,
    /// View opened when none is requested.
    pub default_view: ViewMode,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            default_view: ViewMode::Board,
        }
    }
}

/// Root settings document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Remote API configuration.
    pub api: ApiSettings,
    /// Presentation defaults.
    pub ui: UiSettings,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
