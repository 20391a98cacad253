//! Dotted-path partial updates.
//!
//! Every patchable field is listed once in a static table mapping
//! `"<section>.<field>"` to a typed setter. A setter only assigns when the
//! incoming JSON value has the field's type and satisfies its constraints.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

use super::models::{Preferences, ThemeMode};
use super::validate::{is_valid_font_size, is_valid_language, is_valid_size, non_blank};

/// A partial update as sent by the frontend: dotted path → JSON value.
pub type Patch = serde_json::Map<String, Value>;

/// Why a single patch entry was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchSkip {
    /// The path does not name a field.
    NotFound,
    /// The value has the wrong type or is out of range for the field.
    TypeMismatch,
}

type Setter = fn(&mut Preferences, &Value) -> bool;

macro_rules! setters {
    ($($path:literal => $section:ident . $field:ident : $assign:ident),* $(,)?) => {
        [$((
            $path,
            (|prefs: &mut Preferences, value: &Value| $assign(&mut prefs.$section.$field, value))
                as Setter,
        )),*]
    };
}

static SETTERS: Lazy<HashMap<&'static str, Setter>> = Lazy::new(|| {
    HashMap::from(setters! {
        "behavior.welcomed" => behavior.welcomed: assign_bool,
        "behavior.asideWidth" => behavior.aside_width: assign_size,
        "behavior.windowWidth" => behavior.window_width: assign_size,
        "behavior.windowHeight" => behavior.window_height: assign_size,
        "behavior.windowMaximised" => behavior.window_maximised: assign_bool,
        "behavior.windowPosX" => behavior.window_pos_x: assign_int,
        "behavior.windowPosY" => behavior.window_pos_y: assign_int,
        "general.theme" => general.theme: assign_theme,
        "general.language" => general.language: assign_language,
        "general.font" => general.font: assign_optional_string,
        "general.fontFamily" => general.font_family: assign_string_list,
        "general.fontSize" => general.font_size: assign_font_size,
        "general.useSysProxy" => general.use_sys_proxy: assign_bool,
        "general.useSysProxyHttp" => general.use_sys_proxy_http: assign_bool,
        "general.checkUpdate" => general.check_update: assign_bool,
        "general.skipVersion" => general.skip_version: assign_optional_string,
        "general.allowTrack" => general.allow_track: assign_bool,
        "editor.font" => editor.font: assign_optional_string,
        "editor.fontFamily" => editor.font_family: assign_string_list,
        "editor.fontSize" => editor.font_size: assign_font_size,
        "editor.showLineNum" => editor.show_line_num: assign_bool,
        "editor.showFolding" => editor.show_folding: assign_bool,
        "editor.dropText" => editor.drop_text: assign_bool,
        "editor.links" => editor.links: assign_bool,
    })
});

/// All dotted paths accepted by [`apply_entry`].
pub fn patch_paths() -> impl Iterator<Item = &'static str> {
    SETTERS.keys().copied()
}

/// Apply one patch entry in place.
pub fn apply_entry(prefs: &mut Preferences, key: &str, value: &Value) -> Result<(), PatchSkip> {
    let setter = SETTERS.get(key).ok_or(PatchSkip::NotFound)?;
    if setter(prefs, value) {
        Ok(())
    } else {
        Err(PatchSkip::TypeMismatch)
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    // JS numbers may arrive as whole floats.
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i32)
    } else {
        None
    }
}

fn assign_bool(field: &mut bool, value: &Value) -> bool {
    match value.as_bool() {
        Some(b) => {
            *field = b;
            true
        }
        None => false,
    }
}

fn assign_int(field: &mut i32, value: &Value) -> bool {
    match as_i32(value) {
        Some(n) => {
            *field = n;
            true
        }
        None => false,
    }
}

fn assign_size(field: &mut i32, value: &Value) -> bool {
    match as_i32(value).filter(|n| is_valid_size(*n)) {
        Some(n) => {
            *field = n;
            true
        }
        None => false,
    }
}

fn assign_font_size(field: &mut i32, value: &Value) -> bool {
    match as_i32(value).filter(|n| is_valid_font_size(*n)) {
        Some(n) => {
            *field = n;
            true
        }
        None => false,
    }
}

fn assign_theme(field: &mut ThemeMode, value: &Value) -> bool {
    match value.as_str().and_then(ThemeMode::parse) {
        Some(theme) => {
            *field = theme;
            true
        }
        None => false,
    }
}

fn assign_language(field: &mut String, value: &Value) -> bool {
    match value.as_str().filter(|s| is_valid_language(s)) {
        Some(s) => {
            *field = s.to_string();
            true
        }
        None => false,
    }
}

// Null and "" both clear the field.
fn assign_optional_string(field: &mut Option<String>, value: &Value) -> bool {
    match value {
        Value::Null => {
            *field = None;
            true
        }
        Value::String(s) => {
            *field = non_blank(Some(s.clone()));
            true
        }
        _ => false,
    }
}

fn assign_string_list(field: &mut Vec<String>, value: &Value) -> bool {
    let Some(items) = value.as_array() else {
        return false;
    };
    let parsed: Option<Vec<String>> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect();
    match parsed {
        Some(list) => {
            *field = list;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_document_field_has_a_path() {
        let json = serde_json::to_value(Preferences::default()).expect("serialize prefs");
        let mut expected = Vec::new();
        for (section, fields) in json.as_object().expect("object") {
            for field in fields.as_object().expect("section object").keys() {
                expected.push(format!("{section}.{field}"));
            }
        }
        let mut known: Vec<String> = patch_paths().map(str::to_string).collect();
        expected.sort();
        known.sort();
        assert_eq!(known, expected);
    }

    #[test]
    fn matching_values_are_assigned() {
        let mut prefs = Preferences::default();
        apply_entry(&mut prefs, "behavior.windowWidth", &json!(1280)).expect("width");
        apply_entry(&mut prefs, "behavior.windowPosX", &json!(-50)).expect("pos x");
        apply_entry(&mut prefs, "general.theme", &json!("dark")).expect("theme");
        apply_entry(&mut prefs, "general.fontFamily", &json!(["Inter", "sans-serif"]))
            .expect("font family");
        apply_entry(&mut prefs, "editor.links", &json!(false)).expect("links");
        apply_entry(&mut prefs, "general.fontSize", &json!(16.0)).expect("whole float");

        assert_eq!(prefs.behavior.window_width, 1280);
        assert_eq!(prefs.behavior.window_pos_x, -50);
        assert_eq!(prefs.general.theme, ThemeMode::Dark);
        assert_eq!(prefs.general.font_family, vec!["Inter", "sans-serif"]);
        assert!(!prefs.editor.links);
        assert_eq!(prefs.general.font_size, 16);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let mut prefs = Preferences::default();
        assert_eq!(
            apply_entry(&mut prefs, "behavior.windowDepth", &json!(1)),
            Err(PatchSkip::NotFound)
        );
        assert_eq!(
            apply_entry(&mut prefs, "windowWidth", &json!(1)),
            Err(PatchSkip::NotFound)
        );
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn mismatched_values_leave_field_untouched() {
        let mut prefs = Preferences::default();
        let cases = [
            ("behavior.windowWidth", json!("not-an-int")),
            ("behavior.windowWidth", json!(-5)),
            ("behavior.windowHeight", json!(700.5)),
            ("behavior.windowPosY", json!(i64::MAX)),
            ("behavior.welcomed", json!(1)),
            ("general.theme", json!("solarized")),
            ("general.language", json!("")),
            ("general.fontSize", json!(0)),
            ("general.fontFamily", json!(["Inter", 3])),
            ("editor.font", json!(12)),
        ];
        for (key, value) in cases {
            assert_eq!(
                apply_entry(&mut prefs, key, &value),
                Err(PatchSkip::TypeMismatch),
                "{key} = {value}"
            );
        }
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn optional_strings_clear_on_null_or_empty() {
        let mut prefs = Preferences::default();
        apply_entry(&mut prefs, "general.skipVersion", &json!("v2.0.0")).expect("set skip");
        assert_eq!(prefs.general.skip_version.as_deref(), Some("v2.0.0"));
        apply_entry(&mut prefs, "general.skipVersion", &Value::Null).expect("clear skip");
        assert_eq!(prefs.general.skip_version, None);
        apply_entry(&mut prefs, "editor.font", &json!("Hack")).expect("set font");
        apply_entry(&mut prefs, "editor.font", &json!("")).expect("clear font");
        assert_eq!(prefs.editor.font, None);
        apply_entry(&mut prefs, "general.font", &json!("  ")).expect("blank font");
        assert_eq!(prefs.general.font, None);
    }
}
