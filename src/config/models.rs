use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::defaults;

/// Full preferences document as seen by the frontend (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Preferences {
    #[serde(default)]
    pub behavior: BehaviorPreferences,
    #[serde(default)]
    pub general: GeneralPreferences,
    #[serde(default)]
    pub editor: EditorPreferences,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            behavior: BehaviorPreferences::default(),
            general: GeneralPreferences::default(),
            editor: EditorPreferences::default(),
        }
    }
}

/// Window and layout state remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BehaviorPreferences {
    #[serde(default)]
    pub welcomed: bool,
    #[serde(default = "crate::config::defaults::default_aside_width")]
    pub aside_width: i32,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: i32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: i32,
    #[serde(default)]
    pub window_maximised: bool,
    #[serde(default)]
    pub window_pos_x: i32,
    #[serde(default)]
    pub window_pos_y: i32,
}

impl Default for BehaviorPreferences {
    fn default() -> Self {
        BehaviorPreferences {
            welcomed: false,
            aside_width: defaults::default_aside_width(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            window_maximised: false,
            window_pos_x: 0,
            window_pos_y: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeneralPreferences {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_language")]
    pub language: String,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub font_family: Vec<String>,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: i32,
    #[serde(default)]
    pub use_sys_proxy: bool,
    #[serde(default)]
    pub use_sys_proxy_http: bool,
    #[serde(default = "crate::config::defaults::default_check_update")]
    pub check_update: bool,
    #[serde(default)]
    pub skip_version: Option<String>,
    #[serde(default = "crate::config::defaults::default_allow_track")]
    pub allow_track: bool,
}

impl Default for GeneralPreferences {
    fn default() -> Self {
        GeneralPreferences {
            theme: ThemeMode::Auto,
            language: defaults::default_language(),
            font: None,
            font_family: Vec::new(),
            font_size: defaults::default_font_size(),
            use_sys_proxy: false,
            use_sys_proxy_http: false,
            check_update: defaults::default_check_update(),
            skip_version: None,
            allow_track: defaults::default_allow_track(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EditorPreferences {
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub font_family: Vec<String>,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: i32,
    #[serde(default = "crate::config::defaults::default_editor_toggle")]
    pub show_line_num: bool,
    #[serde(default = "crate::config::defaults::default_editor_toggle")]
    pub show_folding: bool,
    #[serde(default = "crate::config::defaults::default_editor_toggle")]
    pub drop_text: bool,
    #[serde(default = "crate::config::defaults::default_editor_toggle")]
    pub links: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        EditorPreferences {
            font: None,
            font_family: Vec::new(),
            font_size: defaults::default_font_size(),
            show_line_num: defaults::default_editor_toggle(),
            show_folding: defaults::default_editor_toggle(),
            drop_text: defaults::default_editor_toggle(),
            links: defaults::default_editor_toggle(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Auto
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parses the wire label; labels are matched exactly, as the frontend sends them.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "auto" => Some(ThemeMode::Auto),
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_matches_documented_values() {
        let prefs = Preferences::default();
        assert!(!prefs.behavior.welcomed);
        assert_eq!(prefs.behavior.aside_width, 300);
        assert_eq!(prefs.behavior.window_width, 1024);
        assert_eq!(prefs.behavior.window_height, 768);
        assert!(!prefs.behavior.window_maximised);
        assert_eq!(
            (prefs.behavior.window_pos_x, prefs.behavior.window_pos_y),
            (0, 0)
        );
        assert_eq!(prefs.general.theme, ThemeMode::Auto);
        assert_eq!(prefs.general.language, "auto");
        assert_eq!(prefs.general.font, None);
        assert!(prefs.general.font_family.is_empty());
        assert_eq!(prefs.general.font_size, 14);
        assert!(!prefs.general.use_sys_proxy);
        assert!(!prefs.general.use_sys_proxy_http);
        assert!(prefs.general.check_update);
        assert_eq!(prefs.general.skip_version, None);
        assert!(prefs.general.allow_track);
        assert_eq!(prefs.editor.font_size, 14);
        assert!(prefs.editor.show_line_num);
        assert!(prefs.editor.show_folding);
        assert!(prefs.editor.drop_text);
        assert!(prefs.editor.links);
    }

    #[test]
    fn json_contract_uses_camel_case_names() {
        let json = serde_json::to_value(Preferences::default()).expect("serialize prefs");
        assert_eq!(json["behavior"]["windowWidth"], 1024);
        assert_eq!(json["behavior"]["windowMaximised"], false);
        assert_eq!(json["general"]["theme"], "auto");
        assert_eq!(json["general"]["useSysProxyHttp"], false);
        assert_eq!(json["editor"]["showLineNum"], true);
    }

    #[test]
    fn partial_json_fills_missing_fields_with_defaults() {
        let decoded: Preferences =
            serde_json::from_str(r#"{"general":{"theme":"dark"}}"#).expect("decode partial prefs");
        assert_eq!(decoded.general.theme, ThemeMode::Dark);
        assert_eq!(decoded.general.font_size, 14);
        assert_eq!(decoded.behavior, BehaviorPreferences::default());
    }

    #[test]
    fn theme_labels_parse_exactly() {
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("Dark"), None);
        assert_eq!(ThemeMode::parse("night"), None);
    }

    #[test]
    fn log_level_labels_accept_supported_values() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
    }
}
