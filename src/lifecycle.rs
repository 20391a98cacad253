//! Hooks the desktop shell calls around the main window's life.
//!
//! The shell itself (webview, menus, asset serving) lives outside this crate;
//! it only needs to implement [`Host`] and call the hooks in order:
//! [`startup_options`] before creating the window, [`on_init`] once the
//! runtime is up, [`on_ready`] after the page has loaded and [`on_close`]
//! when the window is about to close. Resize and move events go straight to
//! [`PreferencesBridge::save_window_size`] and
//! [`PreferencesBridge::save_window_position`].

use serde::Serialize;
use tracing::{debug, info};

use crate::bridge::PreferencesBridge;
use crate::consts::{APP_NAME, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::window::{ScreenSize, WindowPosition};

/// What the shell can tell us about, and do to, the main window.
pub trait Host {
    /// Size of the screen the window is on, if the platform reports one.
    fn current_screen(&self) -> Option<ScreenSize>;
    fn set_position(&self, position: WindowPosition);
    fn position(&self) -> WindowPosition;
    fn show(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStartState {
    Normal,
    Maximised,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupOptions {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub start_state: WindowStartState,
}

pub fn startup_options(bridge: &PreferencesBridge) -> StartupOptions {
    let size = bridge.get_window_size();
    StartupOptions {
        title: APP_NAME.to_string(),
        width: size.width,
        height: size.height,
        min_width: MIN_WINDOW_WIDTH,
        min_height: MIN_WINDOW_HEIGHT,
        start_state: if size.maximised {
            WindowStartState::Maximised
        } else {
            WindowStartState::Normal
        },
    }
}

pub fn on_init(bridge: &PreferencesBridge, version: &str) {
    bridge.set_app_version(version);
    let prefs = bridge.store().get();
    info!(
        version = %bridge.app_version(),
        path = %bridge.store().path().display(),
        theme = %prefs.general.theme,
        language = %prefs.general.language,
        "Preferences ready"
    );
}

/// Place the window at its reconciled position and reveal it.
pub fn on_ready(bridge: &PreferencesBridge, host: &dyn Host) {
    let screen = host.current_screen();
    let position = bridge.get_window_position(screen);
    debug!(x = position.x, y = position.y, ?screen, "Placing main window");
    host.set_position(position);
    host.show();
}

/// Save the last window position. Returns whether the close should be prevented.
pub fn on_close(bridge: &PreferencesBridge, host: &dyn Host) -> bool {
    let position = host.position();
    bridge.save_window_position(position.x, position.y);
    info!(x = position.x, y = position.y, "Main window closing");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PreferencesStore;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file(name: &str, extension: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("devbox_test_{name}_{nanos}.{extension}"))
    }

    #[derive(Default)]
    struct FakeHost {
        screen: Option<ScreenSize>,
        position: Mutex<Option<WindowPosition>>,
        shown: Mutex<bool>,
    }

    impl Host for FakeHost {
        fn current_screen(&self) -> Option<ScreenSize> {
            self.screen
        }

        fn set_position(&self, position: WindowPosition) {
            *self.position.lock().expect("position lock") = Some(position);
        }

        fn position(&self) -> WindowPosition {
            self.position
                .lock()
                .expect("position lock")
                .unwrap_or(WindowPosition { x: 0, y: 0 })
        }

        fn show(&self) {
            *self.shown.lock().expect("shown lock") = true;
        }
    }

    fn bridge(name: &str) -> PreferencesBridge {
        PreferencesBridge::new(Arc::new(PreferencesStore::new(unique_temp_file(name, "toml"))))
    }

    #[test]
    fn startup_options_follow_stored_size() {
        let bridge = bridge("startup");
        bridge.save_window_size(1280, 800, false);
        bridge.save_window_size(0, 0, true);
        let options = startup_options(&bridge);
        assert_eq!(options.title, "Dev Box");
        assert_eq!((options.width, options.height), (1280, 800));
        assert_eq!((options.min_width, options.min_height), (960, 640));
        assert_eq!(options.start_state, WindowStartState::Maximised);
        let _ = std::fs::remove_file(bridge.store().path());
    }

    #[test]
    fn on_init_records_app_version() {
        let bridge = bridge("init");
        on_init(&bridge, "2.1.0");
        assert_eq!(bridge.app_version(), "v2.1.0");
    }

    #[test]
    fn on_ready_centres_on_first_run_and_shows_window() {
        let bridge = bridge("ready");
        let host = FakeHost {
            screen: Some(ScreenSize {
                width: 1920,
                height: 1080,
            }),
            ..FakeHost::default()
        };
        on_ready(&bridge, &host);
        assert_eq!(host.position(), WindowPosition { x: 448, y: 156 });
        assert!(*host.shown.lock().expect("shown lock"));
    }

    #[test]
    fn on_close_saves_position_for_next_ready() {
        let bridge = bridge("close");
        let host = FakeHost {
            screen: Some(ScreenSize {
                width: 1920,
                height: 1080,
            }),
            ..FakeHost::default()
        };
        host.set_position(WindowPosition { x: 200, y: 150 });
        assert!(!on_close(&bridge, &host));

        let next = FakeHost {
            screen: host.screen,
            ..FakeHost::default()
        };
        on_ready(&bridge, &next);
        assert_eq!(next.position(), WindowPosition { x: 200, y: 150 });
        let _ = std::fs::remove_file(bridge.store().path());
    }
}
