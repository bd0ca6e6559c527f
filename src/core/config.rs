//=========================================================================
// Configuration
//=========================================================================
//
// Session settings and their persisted form.
//
// Layering (last wins):
//   Config::defaults(profile)  →  ConfigStore::load()  →  `-f` override
//
// The store only persists display and volume settings; the network
// address always starts from its compiled default.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

//=== External Dependencies ===============================================

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::paths::SearchPathList;
use crate::core::profile::{PlatformProfile, MAX_VOLUME};

//=== Constants ===========================================================

/// Native canvas size; also the smallest accepted display size.
pub const SCREEN_WIDTH: u32 = 320;
pub const SCREEN_HEIGHT: u32 = 200;

pub const MAX_SCALE: u32 = 4;

pub const DEFAULT_NETWORK_ADDRESS: &str = "192.168.0.1";

/// File name looked up in every config search path.
pub const CONFIG_FILE_NAME: &str = "stagehand.toml";

//=== Config ==============================================================

/// Settings owned by the session for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub display_width: u32,
    pub display_height: u32,
    pub fullscreen: bool,
    pub scale_factor: u32,
    pub sound_volume: u8,
    pub music_volume: u8,
    pub network_address: String,
}

impl Config {
    /// Hard-coded defaults, applied before anything persisted.
    pub fn defaults(profile: &PlatformProfile) -> Self {
        Self {
            display_width: SCREEN_WIDTH,
            display_height: SCREEN_HEIGHT,
            fullscreen: profile.fullscreen_only,
            scale_factor: 1,
            sound_volume: MAX_VOLUME >> 2,
            music_volume: profile.default_music_volume.min(MAX_VOLUME),
            network_address: DEFAULT_NETWORK_ADDRESS.to_string(),
        }
    }

    /// Pulls out-of-range values back into range.
    pub fn sanitize(&mut self) {
        self.display_width = self.display_width.max(SCREEN_WIDTH);
        self.display_height = self.display_height.max(SCREEN_HEIGHT);
        self.scale_factor = self.scale_factor.clamp(1, MAX_SCALE);
        self.sound_volume = self.sound_volume.min(MAX_VOLUME);
        self.music_volume = self.music_volume.min(MAX_VOLUME);
    }
}

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not serialize settings")]
    Serialize(#[from] toml::ser::Error),

    #[error("no config path accepted {CONFIG_FILE_NAME}")]
    NoWritableLocation,
}

//=== ConfigStore =========================================================

/// Persisted-settings collaborator.
pub trait ConfigStore {
    /// Overrides fields of `config` with persisted values.
    ///
    /// Returns `Ok(false)` when nothing is persisted yet.
    fn load(&mut self, paths: &SearchPathList, config: &mut Config) -> Result<bool, ConfigError>;

    /// Writes the persisted subset of `config`.
    fn save(&mut self, paths: &SearchPathList, config: &Config) -> Result<(), ConfigError>;
}

//=== StoredSettings ======================================================

/// On-disk record. Every field is optional so hand-edited files may
/// carry only the settings they care about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct StoredSettings {
    display_width: Option<u32>,
    display_height: Option<u32>,
    fullscreen: Option<bool>,
    scale_factor: Option<u32>,
    sound_volume: Option<u8>,
    music_volume: Option<u8>,
}

impl StoredSettings {
    fn apply_to(&self, config: &mut Config) {
        if let Some(width) = self.display_width {
            config.display_width = width;
        }
        if let Some(height) = self.display_height {
            config.display_height = height;
        }
        if let Some(fullscreen) = self.fullscreen {
            config.fullscreen = fullscreen;
        }
        if let Some(scale) = self.scale_factor {
            config.scale_factor = scale;
        }
        if let Some(volume) = self.sound_volume {
            config.sound_volume = volume;
        }
        if let Some(volume) = self.music_volume {
            config.music_volume = volume;
        }
        config.sanitize();
    }
}

impl From<&Config> for StoredSettings {
    fn from(config: &Config) -> Self {
        Self {
            display_width: Some(config.display_width),
            display_height: Some(config.display_height),
            fullscreen: Some(config.fullscreen),
            scale_factor: Some(config.scale_factor),
            sound_volume: Some(config.sound_volume),
            music_volume: Some(config.music_volume),
        }
    }
}

//=== TomlConfigStore =====================================================

/// Reads and writes `stagehand.toml` in the config search paths.
#[derive(Debug, Default)]
pub struct TomlConfigStore;

impl TomlConfigStore {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&mut self, paths: &SearchPathList, config: &mut Config) -> Result<bool, ConfigError> {
        for path in paths.candidates(CONFIG_FILE_NAME) {
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => return Err(ConfigError::Read { path, source }),
            };

            let stored: StoredSettings = toml::from_str(&contents)
                .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;

            stored.apply_to(config);
            info!(target: "config", "Loaded settings from {}", path.display());
            return Ok(true);
        }

        debug!(target: "config", "No {} found, keeping defaults", CONFIG_FILE_NAME);
        Ok(false)
    }

    fn save(&mut self, paths: &SearchPathList, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(&StoredSettings::from(config))?;

        for path in paths.candidates(CONFIG_FILE_NAME) {
            match fs::write(&path, &contents) {
                Ok(()) => {
                    info!(target: "config", "Saved settings to {}", path.display());
                    return Ok(());
                }
                Err(e) => {
                    debug!(target: "config", "Cannot write {}: {}", path.display(), e);
                }
            }
        }

        Err(ConfigError::NoWritableLocation)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
