//! Window geometry: initial size, on-screen position and write-back.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use ts_rs::TS;

use crate::config::{Patch, Preferences};
use crate::consts::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::error::Result;
use crate::store::PreferencesStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
    pub maximised: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

/// Size of the display the window is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    const FALLBACK: ScreenSize = ScreenSize {
        width: DEFAULT_WINDOW_WIDTH,
        height: DEFAULT_WINDOW_HEIGHT,
    };
}

/// Size and state to open the window with. Minimums are not applied here.
pub fn initial_size(prefs: &Preferences) -> WindowSize {
    let mut width = prefs.behavior.window_width;
    let mut height = prefs.behavior.window_height;
    if width <= 0 {
        width = DEFAULT_WINDOW_WIDTH;
    }
    if height <= 0 {
        height = DEFAULT_WINDOW_HEIGHT;
    }
    WindowSize {
        width,
        height,
        maximised: prefs.behavior.window_maximised,
    }
}

/// Keep the stored position if the whole window fits on `screen`, otherwise centre it.
///
/// An unknown or empty screen is treated as 1024x768.
pub fn reconcile_position(
    stored: WindowPosition,
    width: i32,
    height: i32,
    screen: Option<ScreenSize>,
) -> WindowPosition {
    let screen = screen
        .filter(|s| s.width > 0 && s.height > 0)
        .unwrap_or(ScreenSize::FALLBACK);

    let fits = stored.x > 0
        && stored.y > 0
        && stored.x.saturating_add(width) <= screen.width
        && stored.y.saturating_add(height) <= screen.height;
    if fits {
        return stored;
    }

    let centred = WindowPosition {
        x: screen.width.saturating_sub(width) / 2,
        y: screen.height.saturating_sub(height) / 2,
    };
    debug!(
        stored_x = stored.x,
        stored_y = stored.y,
        x = centred.x,
        y = centred.y,
        screen_width = screen.width,
        screen_height = screen.height,
        "Stored window position is off screen, centring"
    );
    centred
}

/// Position to place the window at, from the stored document.
pub fn stored_position(prefs: &Preferences, screen: Option<ScreenSize>) -> WindowPosition {
    reconcile_position(
        WindowPosition {
            x: prefs.behavior.window_pos_x,
            y: prefs.behavior.window_pos_y,
        },
        prefs.behavior.window_width,
        prefs.behavior.window_height,
        screen,
    )
}

/// Record a resize. Maximising keeps the restored size; undersized windows are ignored.
pub fn on_resize(store: &PreferencesStore, width: i32, height: i32, maximised: bool) -> Result<()> {
    let patch = if maximised {
        json!({ "behavior.windowMaximised": true })
    } else if width >= MIN_WINDOW_WIDTH && height >= MIN_WINDOW_HEIGHT {
        json!({
            "behavior.windowWidth": width,
            "behavior.windowHeight": height,
            "behavior.windowMaximised": false,
        })
    } else {
        debug!(width, height, "Ignoring resize below minimum window size");
        return Ok(());
    };
    store.update(&into_patch(patch))
}

/// Record a move. A (0, 0) report is treated as not yet settled.
pub fn on_move(store: &PreferencesStore, x: i32, y: i32) -> Result<()> {
    if x <= 0 && y <= 0 {
        debug!(x, y, "Ignoring unsettled window position");
        return Ok(());
    }
    store.update(&into_patch(json!({
        "behavior.windowPosX": x,
        "behavior.windowPosY": y,
    })))
}

fn into_patch(value: serde_json::Value) -> Patch {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Patch::new(),
    }
}
