//! Preferences document and its persistence.
//!
//! The document is exchanged with the frontend as camelCase JSON and stored
//! on disk as snake_case TOML tables (`[behavior]`, `[general]`, `[editor]`).
//! Missing or invalid entries fall back to defaults so the app can always
//! launch.

mod defaults;
mod io;
mod models;
mod patch;
mod tables;
mod validate;

pub use io::{app_config_path, load_config, parse_config, save_config, serialize_config};
pub use models::{
    BehaviorPreferences, EditorPreferences, GeneralPreferences, LogLevel, Preferences, ThemeMode,
};
pub use patch::{Patch, PatchSkip, apply_entry, patch_paths};
