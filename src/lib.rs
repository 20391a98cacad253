//! Backend of the Dev Box desktop app: preferences, window geometry and the
//! bridge the webview frontend talks to.

pub mod bridge;
pub mod config;
pub mod consts;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod store;
pub mod update_check;
pub mod window;

use std::fs;
use std::path::Path;
use ts_rs::TS;

pub use bridge::{JsResponse, PreferencesBridge, ResponseCode};
pub use error::PreferencesError;
pub use store::PreferencesStore;

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<(), String> {
    T::export_all_to(out_dir).map_err(|err| err.to_string())
}

/// Regenerate the frontend's TypeScript model files in `out_dir`.
pub fn export_ts_bindings(out_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;

    for entry in fs::read_dir(out_dir)
        .map_err(|err| format!("Failed to list {}: {err}", out_dir.display()))?
    {
        let entry = entry.map_err(|err| format!("Failed to read entry: {err}"))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .map_err(|err| format!("Failed to remove {}: {err}", path.display()))?;
        }
    }

    export_single_type::<config::Preferences>(out_dir)?;
    export_single_type::<config::BehaviorPreferences>(out_dir)?;
    export_single_type::<config::GeneralPreferences>(out_dir)?;
    export_single_type::<config::EditorPreferences>(out_dir)?;
    export_single_type::<config::ThemeMode>(out_dir)?;
    export_single_type::<bridge::JsResponse>(out_dir)?;
    export_single_type::<window::WindowSize>(out_dir)?;
    export_single_type::<window::WindowPosition>(out_dir)?;

    let index_content = r#"export type { Preferences } from "./Preferences";
export type { BehaviorPreferences } from "./BehaviorPreferences";
export type { GeneralPreferences } from "./GeneralPreferences";
export type { EditorPreferences } from "./EditorPreferences";
export type { ThemeMode } from "./ThemeMode";
export type { JsResponse } from "./JsResponse";
export type { WindowSize } from "./WindowSize";
export type { WindowPosition } from "./WindowPosition";
"#;

    fs::write(out_dir.join("index.ts"), index_content).map_err(|err| {
        format!(
            "Failed to write {}: {err}",
            out_dir.join("index.ts").display()
        )
    })?;

    Ok(())
}
