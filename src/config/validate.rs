//! Field constraints shared by whole-document writes, patches and loading.

use tracing::warn;

use super::defaults;
use super::models::Preferences;

pub(crate) fn is_valid_size(value: i32) -> bool {
    value >= 0
}

pub(crate) fn is_valid_font_size(value: i32) -> bool {
    value > 0
}

pub(crate) fn is_valid_language(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Blank optional strings are never written to disk, so they read back as `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Preferences {
    /// Checks every constrained field and reports the first violation.
    pub fn validate(&self) -> Result<(), String> {
        let sizes = [
            ("behavior.asideWidth", self.behavior.aside_width),
            ("behavior.windowWidth", self.behavior.window_width),
            ("behavior.windowHeight", self.behavior.window_height),
        ];
        for (key, value) in sizes {
            if !is_valid_size(value) {
                return Err(format!("{key} must not be negative (got {value})"));
            }
        }

        let font_sizes = [
            ("general.fontSize", self.general.font_size),
            ("editor.fontSize", self.editor.font_size),
        ];
        for (key, value) in font_sizes {
            if !is_valid_font_size(value) {
                return Err(format!("{key} must be positive (got {value})"));
            }
        }

        if !is_valid_language(&self.general.language) {
            return Err("general.language must not be empty".to_string());
        }

        Ok(())
    }

    /// Clears optional strings that hold only whitespace.
    pub(crate) fn clear_blank_strings(&mut self) {
        self.general.font = non_blank(self.general.font.take());
        self.general.skip_version = non_blank(self.general.skip_version.take());
        self.editor.font = non_blank(self.editor.font.take());
    }

    /// Replaces out-of-range values read from disk with their defaults.
    pub(crate) fn sanitize(&mut self) {
        if !is_valid_size(self.behavior.aside_width) {
            warn!(aside_width = self.behavior.aside_width, "Negative aside width, using default");
            self.behavior.aside_width = defaults::default_aside_width();
        }
        if !is_valid_size(self.behavior.window_width) {
            warn!(window_width = self.behavior.window_width, "Negative window width, using default");
            self.behavior.window_width = defaults::default_window_width();
        }
        if !is_valid_size(self.behavior.window_height) {
            warn!(window_height = self.behavior.window_height, "Negative window height, using default");
            self.behavior.window_height = defaults::default_window_height();
        }
        if !is_valid_font_size(self.general.font_size) {
            warn!(font_size = self.general.font_size, "Invalid general font size, using default");
            self.general.font_size = defaults::default_font_size();
        }
        if !is_valid_font_size(self.editor.font_size) {
            warn!(font_size = self.editor.font_size, "Invalid editor font size, using default");
            self.editor.font_size = defaults::default_font_size();
        }
        if !is_valid_language(&self.general.language) {
            warn!("Empty language, using default");
            self.general.language = defaults::default_language();
        }
    }
}
