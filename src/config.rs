//! Configuration system.
//!
//! TOML file plus `STYLUS_*` environment overrides, deserialized with serde
//! defaults and validated after load.

use crate::error::SnapshotError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Music library root directory.
    pub root: PathBuf,

    /// Sled database location. Defaults to `.stylus/db` under the root.
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub playlist: PlaylistConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Drift-scan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Seconds to wait between node visits, throttling I/O on large trees.
    #[serde(default = "default_pace")]
    pub pace: f64,
}

fn default_pace() -> f64 {
    0.1
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pace: default_pace(),
        }
    }
}

impl ScanConfig {
    pub fn pace_duration(&self) -> Duration {
        Duration::from_secs_f64(self.pace)
    }
}

/// Playlist tuning constants. Carried on the config surface for the
/// playlist generator; not consumed by the snapshot core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Minimum playlist distance between tracks by the same artist.
    #[serde(default = "default_artist_buffer_size")]
    pub artist_buffer_size: u32,

    /// Minimum playlist distance between plays of the same track.
    #[serde(default = "default_song_buffer_size")]
    pub song_buffer_size: u32,

    /// Time from the end of the current song at which the next is queued.
    #[serde(default = "default_time_cutoff_ms")]
    pub time_cutoff_ms: u64,

    #[serde(default = "default_loop_period_secs")]
    pub loop_period_secs: u64,
}

fn default_artist_buffer_size() -> u32 {
    4
}

fn default_song_buffer_size() -> u32 {
    30
}

fn default_time_cutoff_ms() -> u64 {
    2000
}

fn default_loop_period_secs() -> u64 {
    1
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            artist_buffer_size: default_artist_buffer_size(),
            song_buffer_size: default_song_buffer_size(),
            time_cutoff_ms: default_time_cutoff_ms(),
            loop_period_secs: default_loop_period_secs(),
        }
    }
}

impl LibraryConfig {
    /// Load configuration from a TOML file with environment overrides
    /// (`STYLUS_ROOT`, `STYLUS_SCAN__PACE`, ...).
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("STYLUS").separator("__"))
            .build()?;

        let config: LibraryConfig = settings.try_deserialize()?;
        config.validate().map_err(SnapshotError::Config)?;
        Ok(config)
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("library root cannot be empty".to_string());
        }
        if !self.scan.pace.is_finite() || self.scan.pace < 0.0 {
            return Err(format!("invalid scan pace: {}", self.scan.pace));
        }
        Ok(())
    }

    /// Effective store location.
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| self.root.join(".stylus").join("db"))
    }

    /// Config with defaults for everything but the root. Used by tests and
    /// embedders that do not go through a file.
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            root,
            store_path: None,
            scan: ScanConfig::default(),
            playlist: PlaylistConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
