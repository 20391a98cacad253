//! Frontend-facing API. Preference calls answer with a [`JsResponse`] envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};
use ts_rs::TS;

use crate::config::{Patch, Preferences};
use crate::store::PreferencesStore;
use crate::update_check::{ReleaseChecker, UpdateCheckError, normalize_version};
use crate::window::{self, ScreenSize, WindowPosition, WindowSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ResponseCode {
    Ok,
    Failed,
}

impl From<ResponseCode> for u8 {
    fn from(code: ResponseCode) -> Self {
        match code {
            ResponseCode::Ok => 0,
            ResponseCode::Failed => 1,
        }
    }
}

impl TryFrom<u8> for ResponseCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ResponseCode::Ok),
            1 => Ok(ResponseCode::Failed),
            other => Err(format!("unknown response code {other}")),
        }
    }
}

/// Uniform response envelope: `{ code, msg, data? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JsResponse {
    #[ts(type = "number")]
    pub code: ResponseCode,
    #[serde(default)]
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "unknown")]
    pub data: Option<Value>,
}

impl JsResponse {
    pub fn ok() -> Self {
        Self {
            code: ResponseCode::Ok,
            msg: String::new(),
            data: None,
        }
    }

    pub fn ok_with(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::ok()
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            code: ResponseCode::Failed,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == ResponseCode::Ok
    }
}

fn to_data<T: Serialize>(value: &T) -> JsResponse {
    match serde_json::to_value(value) {
        Ok(data) => JsResponse::ok_with(data),
        Err(err) => JsResponse::failed(err.to_string()),
    }
}

/// Preference and window services bound to the frontend.
pub struct PreferencesBridge {
    store: Arc<PreferencesStore>,
    client_version: RwLock<String>,
    releases: ReleaseChecker,
}

impl PreferencesBridge {
    pub fn new(store: Arc<PreferencesStore>) -> Self {
        Self::with_release_checker(store, ReleaseChecker::default())
    }

    pub fn with_release_checker(store: Arc<PreferencesStore>, releases: ReleaseChecker) -> Self {
        Self {
            store,
            client_version: RwLock::new(String::new()),
            releases,
        }
    }

    pub fn store(&self) -> &PreferencesStore {
        &self.store
    }

    pub fn get_preferences(&self) -> JsResponse {
        to_data(&self.store.get())
    }

    pub fn set_preferences(&self, prefs: Preferences) -> JsResponse {
        match self.store.set(prefs) {
            Ok(()) => JsResponse::ok(),
            Err(err) => JsResponse::failed(err.to_string()),
        }
    }

    /// Accepts any JSON value; non-object payloads are rejected.
    pub fn update_preferences(&self, patch: Value) -> JsResponse {
        let Value::Object(patch) = patch else {
            return JsResponse::failed("preferences patch must be an object");
        };
        self.update_preferences_map(&patch)
    }

    pub fn update_preferences_map(&self, patch: &Patch) -> JsResponse {
        match self.store.update(patch) {
            Ok(()) => JsResponse::ok(),
            Err(err) => JsResponse::failed(err.to_string()),
        }
    }

    pub fn restore_preferences(&self) -> JsResponse {
        match self.store.restore_default() {
            Ok(prefs) => JsResponse::ok_with(json!({ "pref": prefs })),
            Err(err) => JsResponse::failed(err.to_string()),
        }
    }

    pub fn set_app_version(&self, version: &str) {
        let normalized = normalize_version(version);
        info!(version = %normalized, "App version set");
        *self
            .client_version
            .write()
            .unwrap_or_else(PoisonError::into_inner) = normalized;
    }

    pub fn app_version(&self) -> String {
        self.client_version
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get_app_version(&self) -> JsResponse {
        JsResponse::ok_with(json!({ "version": self.app_version() }))
    }

    /// Looks up the latest release. Runs without touching the store.
    pub fn check_for_update(&self) -> JsResponse {
        match self.releases.fetch_latest() {
            Ok(release) => JsResponse::ok_with(json!({
                "version": self.app_version(),
                "latest": release.tag_name,
                "page_url": release.html_url,
            })),
            Err(err) => {
                warn!("Update check failed: {err}");
                match err {
                    UpdateCheckError::Network(_) => JsResponse::failed("network error"),
                    UpdateCheckError::InvalidContent(_) => JsResponse::failed("invalid content"),
                }
            }
        }
    }

    pub fn get_window_size(&self) -> WindowSize {
        window::initial_size(&self.store.get())
    }

    pub fn get_window_position(&self, screen: Option<ScreenSize>) -> WindowPosition {
        window::stored_position(&self.store.get(), screen)
    }

    pub fn save_window_size(&self, width: i32, height: i32, maximised: bool) {
        if let Err(err) = window::on_resize(&self.store, width, height, maximised) {
            warn!(width, height, maximised, "Failed to save window size: {err}");
        }
    }

    pub fn save_window_position(&self, x: i32, y: i32) {
        if let Err(err) = window::on_move(&self.store, x, y) {
            warn!(x, y, "Failed to save window position: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn unique_temp_file(name: &str, extension: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("devbox_test_{name}_{nanos}.{extension}"))
    }

    fn bridge(name: &str) -> PreferencesBridge {
        let store = Arc::new(PreferencesStore::new(unique_temp_file(name, "toml")));
        PreferencesBridge::with_release_checker(
            store,
            ReleaseChecker::new("http://127.0.0.1:9/latest", Duration::from_millis(500)),
        )
    }

    #[test]
    fn envelope_serializes_numeric_code_and_omits_empty_data() {
        let json = serde_json::to_value(JsResponse::failed("boom")).expect("serialize");
        assert_eq!(json, json!({ "code": 1, "msg": "boom" }));

        let json = serde_json::to_value(JsResponse::ok_with(json!({ "a": 1 }))).expect("serialize");
        assert_eq!(json, json!({ "code": 0, "msg": "", "data": { "a": 1 } }));

        let decoded: JsResponse =
            serde_json::from_str(r#"{"code":0,"msg":""}"#).expect("deserialize");
        assert!(decoded.is_ok());
        assert!(serde_json::from_str::<JsResponse>(r#"{"code":7,"msg":""}"#).is_err());
    }

    #[test]
    fn get_preferences_returns_document_as_data() {
        let bridge = bridge("bridge_get");
        let resp = bridge.get_preferences();
        assert!(resp.is_ok());
        let data = resp.data.expect("data");
        assert_eq!(data["behavior"]["asideWidth"], 300);
        assert_eq!(data["general"]["theme"], "auto");
    }

    #[test]
    fn set_preferences_reports_validation_failure_in_msg() {
        let bridge = bridge("bridge_set");
        let mut prefs = Preferences::default();
        prefs.behavior.aside_width = -1;
        let resp = bridge.set_preferences(prefs);
        assert_eq!(resp.code, ResponseCode::Failed);
        assert!(resp.msg.contains("behavior.asideWidth"));
    }

    #[test]
    fn update_preferences_applies_patch() {
        let bridge = bridge("bridge_update");
        let resp = bridge.update_preferences(json!({
            "general.theme": "dark",
            "behavior.windowWidth": "wide",
        }));
        assert!(resp.is_ok());
        let prefs = bridge.store().get();
        assert_eq!(prefs.general.theme, ThemeMode::Dark);
        assert_eq!(prefs.behavior.window_width, 1024);
        let _ = std::fs::remove_file(bridge.store().path());
    }

    #[test]
    fn update_preferences_rejects_non_object_payload() {
        let bridge = bridge("bridge_update_array");
        let resp = bridge.update_preferences(json!(["general.theme", "dark"]));
        assert_eq!(resp.code, ResponseCode::Failed);
    }

    #[test]
    fn restore_preferences_wraps_document_under_pref() {
        let bridge = bridge("bridge_restore");
        bridge.update_preferences(json!({ "editor.fontSize": 22 }));
        let resp = bridge.restore_preferences();
        assert!(resp.is_ok());
        let data = resp.data.expect("data");
        assert_eq!(data["pref"]["editor"]["fontSize"], 14);
        let _ = std::fs::remove_file(bridge.store().path());
    }

    #[test]
    fn app_version_is_prefixed() {
        let bridge = bridge("bridge_version");
        bridge.set_app_version("1.0.2");
        let resp = bridge.get_app_version();
        assert_eq!(resp.data.expect("data")["version"], "v1.0.2");
    }

    #[test]
    fn failed_update_check_maps_to_network_error() {
        let bridge = bridge("bridge_check");
        let resp = bridge.check_for_update();
        assert_eq!(resp.code, ResponseCode::Failed);
        assert_eq!(resp.msg, "network error");
    }

    #[test]
    fn window_calls_round_trip_through_store() {
        let bridge = bridge("bridge_window");
        bridge.save_window_size(1300, 900, false);
        bridge.save_window_position(120, 80);
        assert_eq!(
            bridge.get_window_size(),
            WindowSize {
                width: 1300,
                height: 900,
                maximised: false,
            }
        );
        let screen = Some(ScreenSize {
            width: 2560,
            height: 1440,
        });
        assert_eq!(
            bridge.get_window_position(screen),
            WindowPosition { x: 120, y: 80 }
        );
        let small = Some(ScreenSize {
            width: 1366,
            height: 768,
        });
        assert_eq!(bridge.get_window_position(small), WindowPosition { x: 33, y: -66 });
        let _ = std::fs::remove_file(bridge.store().path());
    }
}
