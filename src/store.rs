//! Lock-guarded owner of the preferences document and its backing file.

use once_cell::sync::OnceCell;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::config::{self, Patch, Preferences};
use crate::error::{PreferencesError, Result};

/// Single authority over the preferences document.
///
/// The file is read lazily on first access. Reads share the lock; every
/// mutation holds the write lock across the in-memory change and the file
/// write, so two mutations never interleave.
#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
    doc: OnceCell<RwLock<Preferences>>,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            doc: OnceCell::new(),
        }
    }

    /// Store backed by [`config::app_config_path`].
    pub fn open_default() -> Self {
        Self::new(config::app_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn document(&self) -> &RwLock<Preferences> {
        self.doc
            .get_or_init(|| RwLock::new(config::load_config(&self.path)))
    }

    fn read(&self) -> RwLockReadGuard<'_, Preferences> {
        self.document().read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Preferences> {
        self.document().write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, prefs: &Preferences) -> Result<()> {
        config::save_config(&self.path, prefs).map_err(|err| {
            warn!(path = %self.path.display(), "Failed to save preferences: {err:#}");
            PreferencesError::persistence(&self.path, err)
        })
    }

    pub fn get(&self) -> Preferences {
        self.read().clone()
    }

    /// Replace the whole document. Memory is only updated once the file is written.
    ///
    /// Blank optional strings are stored as `None`, matching what a reload yields.
    pub fn set(&self, mut prefs: Preferences) -> Result<()> {
        prefs.clear_blank_strings();
        prefs.validate().map_err(PreferencesError::Validation)?;
        let mut guard = self.write();
        self.persist(&prefs)?;
        *guard = prefs;
        info!("Replaced preferences");
        Ok(())
    }

    /// Apply every resolvable entry of `patch`, then persist the whole document.
    ///
    /// Unknown keys and mismatched values are skipped. If the write fails the
    /// applied entries stay in memory and the error is returned.
    pub fn update(&self, patch: &Patch) -> Result<()> {
        let mut guard = self.write();
        let mut applied = 0usize;
        for (key, value) in patch {
            match config::apply_entry(&mut guard, key, value) {
                Ok(()) => applied += 1,
                Err(skip) => debug!(%key, %value, ?skip, "Skipped preference patch entry"),
            }
        }
        debug!(applied, total = patch.len(), "Applied preference patch");
        self.persist(&guard)
    }

    /// Convenience for a single dotted key.
    pub fn update_key(&self, key: &str, value: Value) -> Result<()> {
        let mut patch = Patch::new();
        patch.insert(key.to_string(), value);
        self.update(&patch)
    }

    /// Reset to defaults. The in-memory reset takes effect even if the write fails.
    pub fn restore_default(&self) -> Result<Preferences> {
        let mut guard = self.write();
        *guard = Preferences::default();
        info!("Restored default preferences");
        self.persist(&guard)?;
        Ok(guard.clone())
    }
}
