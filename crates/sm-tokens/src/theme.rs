// SPDX-License-Identifier: MIT

//! Light/dark theme selection and the one persisted preference flag.
//!
//! Resolution order on startup: a saved choice wins, otherwise the system
//! preference decides. Every theme that gets enabled is saved, the
//! resolved startup theme included. System preference changes are only
//! followed while nothing is saved.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The two site themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// `"light"` or `"dark"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized theme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?} (expected \"light\" or \"dark\")")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeMode {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Preference storage
// ---------------------------------------------------------------------------

/// Failure to persist the theme flag.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("failed to write preferences to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Where the last explicitly chosen theme is kept.
pub trait PreferenceStore {
    /// The saved theme, or `None` if nothing was saved or it is unreadable.
    fn load(&self) -> Option<ThemeMode>;

    /// Persist `mode` as the user's choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&mut self, mode: ThemeMode) -> Result<(), PreferenceError>;
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    saved: Option<ThemeMode>,
}

impl MemoryPreferences {
    #[must_use]
    pub const fn new() -> Self {
        Self { saved: None }
    }

    #[must_use]
    pub const fn with_saved(mode: ThemeMode) -> Self {
        Self { saved: Some(mode) }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Option<ThemeMode> {
        self.saved
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), PreferenceError> {
        self.saved = Some(mode);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<ThemeMode>,
}

/// TOML-file preference store (`theme = "dark"`).
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/stylemark/preferences.toml`, if the platform has a
    /// config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stylemark").join("preferences.toml"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self) -> Option<ThemeMode> {
        let text = fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<PreferenceFile>(&text) {
            Ok(file) => file.theme,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "ignoring unreadable preferences");
                None
            }
        }
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), PreferenceError> {
        let text = toml::to_string(&PreferenceFile { theme: Some(mode) })?;
        let io_err = |source: io::Error| PreferenceError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, text).map_err(io_err)
    }
}

// ---------------------------------------------------------------------------
// ThemeManager
// ---------------------------------------------------------------------------

/// Notification that the active theme changed (or was first resolved).
///
/// Consumers react to it: the stylesheet switches its active block and the
/// token store reloads from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChanged {
    pub theme: ThemeMode,
}

/// Owns the active theme and its persisted flag.
#[derive(Debug)]
pub struct ThemeManager<P> {
    store: P,
    mode: ThemeMode,
}

impl<P: PreferenceStore> ThemeManager<P> {
    /// Resolve the starting theme (saved flag first, then the system) and
    /// save it. A failed save is logged and the theme still applies.
    pub fn init(mut store: P, system_prefers_dark: bool) -> (Self, ThemeChanged) {
        let saved = store.load();
        let mode = saved.unwrap_or_else(|| ThemeMode::from_prefers_dark(system_prefers_dark));
        debug!(theme = %mode, saved = saved.is_some(), "theme resolved");
        if let Err(e) = store.save(mode) {
            warn!(theme = %mode, error = %e, "failed to save theme preference");
        }
        (Self { store, mode }, ThemeChanged { theme: mode })
    }

    /// The active theme.
    #[must_use]
    pub const fn current(&self) -> ThemeMode {
        self.mode
    }

    /// Whether a theme is saved.
    #[must_use]
    pub fn has_saved_choice(&self) -> bool {
        self.store.load().is_some()
    }

    /// Switch to `mode` and persist it as the user's choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be saved; the active theme is
    /// still switched.
    pub fn set(&mut self, mode: ThemeMode) -> Result<ThemeChanged, PreferenceError> {
        self.mode = mode;
        self.store.save(mode)?;
        Ok(ThemeChanged { theme: mode })
    }

    /// Flip between light and dark, persisting the result.
    ///
    /// # Errors
    ///
    /// See [`set`](Self::set).
    pub fn toggle(&mut self) -> Result<ThemeChanged, PreferenceError> {
        self.set(self.mode.toggled())
    }

    /// Follow a system preference change unless a theme is saved.
    pub fn system_preference_changed(&mut self, prefers_dark: bool) -> Option<ThemeChanged> {
        if self.has_saved_choice() {
            return None;
        }
        let mode = ThemeMode::from_prefers_dark(prefers_dark);
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        Some(ThemeChanged { theme: mode })
    }

    /// Give back the preference store.
    pub fn into_store(self) -> P {
        self.store
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_and_display() {
        assert_eq!("Dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!(" light ".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert!("sepia".parse::<ThemeMode>().is_err());
        assert_eq!(ThemeMode::Dark.to_string(), "dark");
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn saved_choice_beats_system() {
        let (m, changed) = ThemeManager::init(MemoryPreferences::with_saved(ThemeMode::Light), true);
        assert_eq!(m.current(), ThemeMode::Light);
        assert_eq!(changed.theme, ThemeMode::Light);
    }

    #[test]
    fn system_decides_without_saved_choice() {
        let (m, _) = ThemeManager::init(MemoryPreferences::new(), true);
        assert_eq!(m.current(), ThemeMode::Dark);
        let (m, _) = ThemeManager::init(MemoryPreferences::new(), false);
        assert_eq!(m.current(), ThemeMode::Light);
    }

    /// Accepts nothing; every save fails.
    #[derive(Debug, Default)]
    struct ReadOnly;

    impl PreferenceStore for ReadOnly {
        fn load(&self) -> Option<ThemeMode> {
            None
        }

        fn save(&mut self, _: ThemeMode) -> Result<(), PreferenceError> {
            Err(PreferenceError::Io {
                path: PathBuf::from("preferences.toml"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }
    }

    #[test]
    fn init_persists_resolved_theme() {
        let (m, _) = ThemeManager::init(MemoryPreferences::new(), true);
        assert!(m.has_saved_choice());
        assert_eq!(m.into_store().load(), Some(ThemeMode::Dark));

        let (m, _) = ThemeManager::init(MemoryPreferences::with_saved(ThemeMode::Light), true);
        assert_eq!(m.into_store().load(), Some(ThemeMode::Light));
    }

    #[test]
    fn init_survives_failed_save() {
        let (m, changed) = ThemeManager::init(ReadOnly, true);
        assert_eq!(changed.theme, ThemeMode::Dark);
        assert!(!m.has_saved_choice());
    }

    #[test]
    fn toggle_persists() {
        let (mut m, _) = ThemeManager::init(MemoryPreferences::new(), false);
        let changed = m.toggle().unwrap();
        assert_eq!(changed.theme, ThemeMode::Dark);
        assert_eq!(m.into_store().load(), Some(ThemeMode::Dark));
    }

    #[test]
    fn system_change_ignored_once_saved() {
        let (mut m, _) = ThemeManager::init(MemoryPreferences::new(), false);
        assert_eq!(m.system_preference_changed(true), None);
        assert_eq!(m.current(), ThemeMode::Light);
    }

    #[test]
    fn system_change_followed_while_nothing_saved() {
        let (mut m, _) = ThemeManager::init(ReadOnly, false);
        assert_eq!(
            m.system_preference_changed(true),
            Some(ThemeChanged { theme: ThemeMode::Dark })
        );
        // Same preference again: nothing changes.
        assert_eq!(m.system_preference_changed(true), None);
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");
        let mut store = FilePreferences::new(&path);
        assert_eq!(store.load(), None);

        store.save(ThemeMode::Dark).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "theme = \"dark\"");
        assert_eq!(FilePreferences::new(&path).load(), Some(ThemeMode::Dark));
    }

    #[test]
    fn file_store_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "theme = 42\n[[[").unwrap();
        assert_eq!(FilePreferences::new(&path).load(), None);
    }
}
