//! # taskdeck-settings
//!
//! Configuration for the taskdeck client. Loading flow:
//!
//! 1. Start with compiled [`Settings::default()`]
//! 2. If `~/.taskdeck/settings.json` exists, deep-merge user values over
//!    defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! The API base URL has no compiled default — an unset URL is reported
//! by the client as its fatal configuration error, not papered over
//! here.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path};
pub use types::{ApiSettings, Settings, UiSettings, ViewMode};
