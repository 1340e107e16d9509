// src/store.rs
// Settings store: one JSON object under `.store/settings.json`.
use std::{fs, io, path::{Path, PathBuf}};

use crate::config::consts::{SETTINGS_FILE, STORE_DIR};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::messages::Message;

/// Where the page gets its settings from at start-up.
pub trait SettingsSource {
    fn fetch(&mut self) -> Result<Settings>;
}

impl<F: FnMut() -> Result<Settings>> SettingsSource for F {
    fn fetch(&mut self) -> Result<Settings> {
        self()
    }
}

#[derive(Clone, Debug)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(STORE_DIR)
    }
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Stored settings merged over the defaults. No file yet = defaults.
    pub fn load(&self) -> Result<Settings> {
        match fs::read_to_string(self.path()) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        // Ensure parent directories exist
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(self.path(), serde_json::to_string_pretty(settings)?)?;
        logd!("settings saved to {}", self.path().display());
        Ok(())
    }

    /// Back to the install-time defaults.
    pub fn reset(&self) -> Result<Settings> {
        let defaults = Settings::default();
        self.save(&defaults)?;
        Ok(defaults)
    }

    /// The store's side of the message protocol: it answers `GET_SETTINGS`
    /// and ignores everything else.
    pub fn answer(&self, msg: &Message) -> Option<Result<Settings>> {
        match msg {
            Message::GetSettings => Some(self.load()),
            _ => None,
        }
    }
}

impl SettingsSource for SettingsStore {
    fn fetch(&mut self) -> Result<Settings> {
        self.load().map_err(|e| Error::Settings(e.to_string()))
    }
}
