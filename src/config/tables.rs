use super::defaults;
use super::models::{BehaviorPreferences, EditorPreferences, GeneralPreferences, Preferences, ThemeMode};
use super::validate::non_blank;
use serde::Deserialize;
use tracing::warn;

/// On-disk layout of the preferences file: one snake_case table per section.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    behavior: BehaviorTable,
    #[serde(default)]
    general: GeneralTable,
    #[serde(default)]
    editor: EditorTable,
}

impl From<ConfigTables> for Preferences {
    fn from(tables: ConfigTables) -> Self {
        Preferences {
            behavior: BehaviorPreferences {
                welcomed: tables.behavior.welcomed,
                aside_width: tables.behavior.aside_width,
                window_width: tables.behavior.window_width,
                window_height: tables.behavior.window_height,
                window_maximised: tables.behavior.window_maximised,
                window_pos_x: tables.behavior.window_pos_x,
                window_pos_y: tables.behavior.window_pos_y,
            },
            general: GeneralPreferences {
                theme: theme_from_label(&tables.general.theme),
                language: tables.general.language,
                font: non_blank(tables.general.font),
                font_family: tables.general.font_family,
                font_size: tables.general.font_size,
                use_sys_proxy: tables.general.use_sys_proxy,
                use_sys_proxy_http: tables.general.use_sys_proxy_http,
                check_update: tables.general.check_update,
                skip_version: non_blank(tables.general.skip_version),
                allow_track: tables.general.allow_track,
            },
            editor: EditorPreferences {
                font: non_blank(tables.editor.font),
                font_family: tables.editor.font_family,
                font_size: tables.editor.font_size,
                show_line_num: tables.editor.show_line_num,
                show_folding: tables.editor.show_folding,
                drop_text: tables.editor.drop_text,
                links: tables.editor.links,
            },
        }
    }
}

impl From<&Preferences> for ConfigTables {
    fn from(prefs: &Preferences) -> Self {
        ConfigTables {
            behavior: BehaviorTable {
                welcomed: prefs.behavior.welcomed,
                aside_width: prefs.behavior.aside_width,
                window_width: prefs.behavior.window_width,
                window_height: prefs.behavior.window_height,
                window_maximised: prefs.behavior.window_maximised,
                window_pos_x: prefs.behavior.window_pos_x,
                window_pos_y: prefs.behavior.window_pos_y,
            },
            general: GeneralTable {
                theme: prefs.general.theme.as_str().to_string(),
                language: prefs.general.language.clone(),
                font: prefs.general.font.clone(),
                font_family: prefs.general.font_family.clone(),
                font_size: prefs.general.font_size,
                use_sys_proxy: prefs.general.use_sys_proxy,
                use_sys_proxy_http: prefs.general.use_sys_proxy_http,
                check_update: prefs.general.check_update,
                skip_version: prefs.general.skip_version.clone(),
                allow_track: prefs.general.allow_track,
            },
            editor: EditorTable {
                font: prefs.editor.font.clone(),
                font_family: prefs.editor.font_family.clone(),
                font_size: prefs.editor.font_size,
                show_line_num: prefs.editor.show_line_num,
                show_folding: prefs.editor.show_folding,
                drop_text: prefs.editor.drop_text,
                links: prefs.editor.links,
            },
        }
    }
}

// Read as a plain label so an unknown theme only costs the theme, not the file.
fn theme_from_label(label: &str) -> ThemeMode {
    ThemeMode::parse(label).unwrap_or_else(|| {
        warn!(theme = label, "Unknown theme, using default");
        ThemeMode::default()
    })
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct BehaviorTable {
    #[serde(default)]
    welcomed: bool,
    #[serde(default = "defaults::default_aside_width")]
    aside_width: i32,
    #[serde(default = "defaults::default_window_width")]
    window_width: i32,
    #[serde(default = "defaults::default_window_height")]
    window_height: i32,
    #[serde(default)]
    window_maximised: bool,
    #[serde(default)]
    window_pos_x: i32,
    #[serde(default)]
    window_pos_y: i32,
}

impl Default for BehaviorTable {
    fn default() -> Self {
        BehaviorTable {
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

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct GeneralTable {
    #[serde(default = "defaults::default_theme_label")]
    theme: String,
    #[serde(default = "defaults::default_language")]
    language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    font_family: Vec<String>,
    #[serde(default = "defaults::default_font_size")]
    font_size: i32,
    #[serde(default)]
    use_sys_proxy: bool,
    #[serde(default)]
    use_sys_proxy_http: bool,
    #[serde(default = "defaults::default_check_update")]
    check_update: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    skip_version: Option<String>,
    #[serde(default = "defaults::default_allow_track")]
    allow_track: bool,
}

impl Default for GeneralTable {
    fn default() -> Self {
        GeneralTable {
            theme: defaults::default_theme_label(),
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

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct EditorTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    font_family: Vec<String>,
    #[serde(default = "defaults::default_font_size")]
    font_size: i32,
    #[serde(default = "defaults::default_editor_toggle")]
    show_line_num: bool,
    #[serde(default = "defaults::default_editor_toggle")]
    show_folding: bool,
    #[serde(default = "defaults::default_editor_toggle")]
    drop_text: bool,
    #[serde(default = "defaults::default_editor_toggle")]
    links: bool,
}

impl Default for EditorTable {
    fn default() -> Self {
        EditorTable {
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
