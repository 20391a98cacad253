//! Command-line shell around the preferences backend.
//!
//! Lets the store and window policy be inspected and driven without the
//! desktop frontend:
//!
//! ```text
//! devbox [--log-level LEVEL] [--config PATH] <command>
//!   show                      print the preferences envelope
//!   set <key> <json>          apply one dotted-path update
//!   restore                   reset to defaults
//!   window [WxH]              print startup size and reconciled position
//!   resize <w> <h> [max]      record a window resize
//!   move <x> <y>              record a window move
//!   check-update              query the latest release
//!   session [WxH]             run the window lifecycle until Ctrl+C
//! ```

use anyhow::{Context, Result, anyhow, bail};
use devbox::config::{self, LogLevel};
use devbox::lifecycle::{self, Host};
use devbox::window::{ScreenSize, WindowPosition};
use devbox::{JsResponse, PreferencesBridge, PreferencesStore};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, mpsc};
use tracing::{error, info, warn};

const USAGE: &str = "Usage: devbox [--log-level LEVEL] [--config PATH] \
<show|set|restore|window|resize|move|check-update|session> [args...]";

struct Args {
    log_level: LogLevel,
    config_path: Option<PathBuf>,
    command: String,
    rest: Vec<String>,
}

fn main() {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    devbox::logging::init_tracing(args.log_level);
    if let Err(err) = run(args) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args> {
    let mut log_level = LogLevel::default();
    let mut config_path = None;
    let command = loop {
        let arg = raw.next().ok_or_else(|| anyhow!(USAGE))?;
        match arg.as_str() {
            "--log-level" => {
                let label = raw.next().ok_or_else(|| anyhow!("--log-level needs a value"))?;
                log_level = LogLevel::parse(&label)
                    .ok_or_else(|| anyhow!("Unknown log level: {label}"))?;
            }
            "--config" => {
                let path = raw.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => bail!(USAGE),
            _ => break arg,
        }
    };
    Ok(Args {
        log_level,
        config_path,
        command,
        rest: raw.collect(),
    })
}

fn run(args: Args) -> Result<()> {
    let store = match args.config_path {
        Some(path) => PreferencesStore::new(path),
        None => PreferencesStore::open_default(),
    };
    info!(path = %store.path().display(), "Using preferences file");
    let bridge = PreferencesBridge::new(Arc::new(store));
    bridge.set_app_version(env!("CARGO_PKG_VERSION"));

    let rest = args.rest;
    match args.command.as_str() {
        "show" => print_response(&bridge.get_preferences()),
        "set" => {
            let key = rest.first().ok_or_else(|| anyhow!("set needs <key> <json>"))?;
            let raw = rest.get(1).ok_or_else(|| anyhow!("set needs <key> <json>"))?;
            let value: serde_json::Value = serde_json::from_str(raw)
                .or_else(|_| serde_json::to_value(raw))
                .context("Failed to read value")?;
            // The store skips bad entries silently; check first so the user hears about it.
            let mut scratch = bridge.store().get();
            config::apply_entry(&mut scratch, key, &value).map_err(|skip| skip.into_error(key))?;
            let mut patch = config::Patch::new();
            patch.insert(key.clone(), value);
            print_response(&bridge.update_preferences_map(&patch))
        }
        "restore" => print_response(&bridge.restore_preferences()),
        "window" => {
            let screen = rest.first().map(|s| parse_screen(s)).transpose()?;
            let options = lifecycle::startup_options(&bridge);
            let position = bridge.get_window_position(screen);
            print_json(&serde_json::json!({ "startup": options, "position": position }))
        }
        "resize" => {
            let width = parse_int(rest.first(), "width")?;
            let height = parse_int(rest.get(1), "height")?;
            let maximised = rest.get(2).is_some_and(|s| s == "max" || s == "maximised");
            bridge.save_window_size(width, height, maximised);
            print_json(&bridge.get_window_size())
        }
        "move" => {
            let x = parse_int(rest.first(), "x")?;
            let y = parse_int(rest.get(1), "y")?;
            bridge.save_window_position(x, y);
            print_response(&bridge.get_preferences())
        }
        "check-update" => print_response(&bridge.check_for_update()),
        "session" => {
            let screen = rest.first().map(|s| parse_screen(s)).transpose()?;
            run_session(&bridge, screen)
        }
        other => bail!("Unknown command: {other}\n{USAGE}"),
    }
}

/// Headless stand-in for the desktop window.
struct ConsoleHost {
    screen: Option<ScreenSize>,
    position: Mutex<WindowPosition>,
}

impl Host for ConsoleHost {
    fn current_screen(&self) -> Option<ScreenSize> {
        self.screen
    }

    fn set_position(&self, position: WindowPosition) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = position;
    }

    fn position(&self) -> WindowPosition {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn show(&self) {
        let position = self.position();
        println!("window shown at ({}, {})", position.x, position.y);
    }
}

fn run_session(bridge: &PreferencesBridge, screen: Option<ScreenSize>) -> Result<()> {
    let host = ConsoleHost {
        screen,
        position: Mutex::new(WindowPosition { x: 0, y: 0 }),
    };
    let options = lifecycle::startup_options(bridge);
    info!(
        width = options.width,
        height = options.height,
        start_state = ?options.start_state,
        "Opening window"
    );
    lifecycle::on_init(bridge, env!("CARGO_PKG_VERSION"));
    lifecycle::on_ready(bridge, &host);

    let (tx, rx) = mpsc::channel();
    if let Err(err) = ctrlc::set_handler(move || {
        let _ = tx.send(());
    }) {
        warn!("Failed to install Ctrl+C signal handler: {err}");
        return Ok(());
    }
    println!("press Ctrl+C to close the window");
    let _ = rx.recv();
    info!("Received Ctrl+C; running close housekeeping");
    lifecycle::on_close(bridge, &host);
    Ok(())
}

fn parse_int(value: Option<&String>, name: &str) -> Result<i32> {
    let value = value.ok_or_else(|| anyhow!("missing {name}"))?;
    value
        .trim()
        .parse()
        .with_context(|| format!("{name} must be an integer, got {value:?}"))
}

fn parse_screen(value: &str) -> Result<ScreenSize> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("screen must look like 1920x1080, got {value:?}"))?;
    Ok(ScreenSize {
        width: width.trim().parse().context("screen width")?,
        height: height.trim().parse().context("screen height")?,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_response(resp: &JsResponse) -> Result<()> {
    print_json(resp)?;
    if resp.is_ok() {
        Ok(())
    } else {
        Err(anyhow!("{}", resp.msg))
    }
}
