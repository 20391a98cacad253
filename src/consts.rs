//! Shared constants for the preferences backend.

pub const APP_NAME: &str = "Dev Box";
pub const APP_DIR: &str = "devbox";
pub const CONFIG_FILE_NAME: &str = "preferences.toml";
pub const CONFIG_PATH_ENV: &str = "DEVBOX_CONFIG_PATH";

pub const DEFAULT_FONT_SIZE: i32 = 14;
pub const DEFAULT_ASIDE_WIDTH: i32 = 300;
pub const DEFAULT_WINDOW_WIDTH: i32 = 1024;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 768;
pub const MIN_WINDOW_WIDTH: i32 = 960;
pub const MIN_WINDOW_HEIGHT: i32 = 640;
