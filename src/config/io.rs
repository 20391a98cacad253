use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use super::models::Preferences;
use super::tables::ConfigTables;
use crate::consts::{APP_DIR, CONFIG_FILE_NAME, CONFIG_PATH_ENV};

/// Resolve the preferences file: env override, then the platform config dir.
pub fn app_config_path() -> PathBuf {
    if let Some(value) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(value);
    }

    match dirs::config_dir() {
        Some(dir) => dir.join(APP_DIR).join(CONFIG_FILE_NAME),
        None => PathBuf::from("conf").join(CONFIG_FILE_NAME),
    }
}

/// Load preferences from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> Preferences {
    let contents = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "No preferences file yet, using defaults");
            return Preferences::default();
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default preferences: {err}"
            );
            return Preferences::default();
        }
    };

    match parse_config(&contents) {
        Ok(prefs) => {
            info!(path = %path.display(), "Loaded preferences");
            prefs
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid preferences TOML: {err:#}");
            Preferences::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<Preferences> {
    let tables: ConfigTables =
        toml::from_str(contents).context("Failed to parse preferences TOML")?;
    let mut prefs = Preferences::from(tables);
    prefs.sanitize();
    Ok(prefs)
}

pub fn serialize_config(prefs: &Preferences) -> Result<String> {
    toml::to_string_pretty(&ConfigTables::from(prefs))
        .context("Failed to serialize preferences to TOML")
}

/// Write the document next to its destination and rename it into place.
pub fn save_config(path: &Path, prefs: &Preferences) -> Result<()> {
    let contents = serialize_config(prefs)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let temp_path = unique_temp_path(path);
    fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err).with_context(|| format!("Failed to replace {}", path.display()));
    }
    debug!(path = %path.display(), "Saved preferences");
    Ok(())
}

fn unique_temp_path(path: &Path) -> PathBuf {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let nonce = SEQ.fetch_add(1, Ordering::Relaxed);
    let ts_nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let mut temp_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(CONFIG_FILE_NAME)
        .to_string();
    temp_name.push_str(&format!(".tmp-{ts_nanos}-{nonce}"));
    path.with_file_name(temp_name)
}
