use crate::consts::{
    DEFAULT_ASIDE_WIDTH, DEFAULT_FONT_SIZE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};

pub(crate) fn default_aside_width() -> i32 {
    DEFAULT_ASIDE_WIDTH
}

pub(crate) fn default_window_width() -> i32 {
    DEFAULT_WINDOW_WIDTH
}

pub(crate) fn default_window_height() -> i32 {
    DEFAULT_WINDOW_HEIGHT
}

pub(crate) fn default_theme_label() -> String {
    "auto".to_string()
}

pub(crate) fn default_language() -> String {
    "auto".to_string()
}

pub(crate) fn default_font_size() -> i32 {
    DEFAULT_FONT_SIZE
}

pub(crate) fn default_check_update() -> bool {
    true
}

pub(crate) fn default_allow_track() -> bool {
    true
}

pub(crate) fn default_editor_toggle() -> bool {
    true
}
