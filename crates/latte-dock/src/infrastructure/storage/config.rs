//! TOML-based configuration for the dock shell.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Linux:    `~/.config/latte-dock/config.toml` (or `$XDG_CONFIG_HOME`)
//! - macOS:    `~/Library/Application Support/latte-dock/config.toml`
//! - Windows:  `%APPDATA%\latte-dock\config.toml`
//!
//! A file passed on the command line takes precedence; see [`load_config_from`].
//!
//! # Example
//!
//! ```toml
//! [shell]
//! layout_name = "My Layout"
//! session = "wayland"
//!
//! [timings]
//! recreate_delay_ms = 350
//!
//! [[screens]]
//! connector = "DP-1"
//! primary = true
//!
//! [[screens]]
//! connector = "HDMI-1"
//!
//! [[containments]]
//! id = 1
//! edge = "bottom"
//!
//! [[containments]]
//! id = 2
//! on_primary = false
//! screen = "HDMI-1"
//! edge = "left"
//! visibility = "auto-hide"
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = ...)]`, so a config written by an
//! older version (or an empty file) still loads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use latte_core::{Edge, Screen, ScreenPool, ScreenTopology, TopologyError, ViewId, ViewSpec, VisibilityMode};

use crate::application::layout::{LayoutTimings, MemoryUsage};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The `[[screens]]` list does not describe a valid topology.
    #[error("invalid screen list: {0}")]
    Topology(#[from] TopologyError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub timings: TimingsConfig,
    /// Connected screens, in system order.
    #[serde(default)]
    pub screens: Vec<ScreenEntry>,
    #[serde(default)]
    pub containments: Vec<ContainmentEntry>,
}

/// Window system session the shell runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    #[default]
    X11,
    Wayland,
}

/// General shell behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShellConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_layout_name")]
    pub layout_name: String,
    #[serde(default)]
    pub memory_usage: MemoryUsage,
    #[serde(default)]
    pub session: SessionKind,
    /// Pressing Meta alone opens the launcher of a Latte view.
    #[serde(default = "default_true")]
    pub meta_forwarded_to_latte: bool,
}

/// Delays, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingsConfig {
    #[serde(default = "default_recreate_delay_ms")]
    pub recreate_delay_ms: u64,
    #[serde(default = "default_recreate_settle_ms")]
    pub recreate_settle_ms: u64,
    /// Poll interval of the hide-views timer on X11.
    #[serde(default = "default_hide_views_interval_ms")]
    pub hide_views_interval_ms: u64,
    /// Wayland cannot poll modifier state, so the timer simply runs longer.
    #[serde(default = "default_hide_views_interval_wayland_ms")]
    pub hide_views_interval_wayland_ms: u64,
    #[serde(default = "default_ghost_mouse_debounce_ms")]
    pub ghost_mouse_debounce_ms: u64,
}

/// One connected screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenEntry {
    pub connector: String,
    #[serde(default)]
    pub primary: bool,
}

/// Stored configuration of one containment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContainmentEntry {
    pub id: u32,
    /// Connector of the explicit screen.  Ignored while `on_primary` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
    #[serde(default = "default_true")]
    pub on_primary: bool,
    #[serde(default)]
    pub edge: Edge,
    #[serde(default)]
    pub visibility: VisibilityMode,
    #[serde(default)]
    pub by_pass_wm: bool,
    #[serde(default)]
    pub preferred_for_shortcuts: bool,
    #[serde(default = "default_true")]
    pub dock_capable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_id: Option<String>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_layout_name() -> String {
    "My Layout".to_string()
}
fn default_true() -> bool {
    true
}
fn default_recreate_delay_ms() -> u64 {
    350
}
fn default_recreate_settle_ms() -> u64 {
    250
}
fn default_hide_views_interval_ms() -> u64 {
    300
}
fn default_hide_views_interval_wayland_ms() -> u64 {
    2500
}
fn default_ghost_mouse_debounce_ms() -> u64 {
    50
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            layout_name: default_layout_name(),
            memory_usage: MemoryUsage::default(),
            session: SessionKind::default(),
            meta_forwarded_to_latte: default_true(),
        }
    }
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            recreate_delay_ms: default_recreate_delay_ms(),
            recreate_settle_ms: default_recreate_settle_ms(),
            hide_views_interval_ms: default_hide_views_interval_ms(),
            hide_views_interval_wayland_ms: default_hide_views_interval_wayland_ms(),
            ghost_mouse_debounce_ms: default_ghost_mouse_debounce_ms(),
        }
    }
}

// ── Conversion into domain types ──────────────────────────────────────────────

impl AppConfig {
    /// The `[[screens]]` list as a topology.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Topology`] for duplicate connectors or more
    /// than one primary screen.
    pub fn to_topology(&self) -> Result<ScreenTopology, ConfigError> {
        let screens = self
            .screens
            .iter()
            .map(|entry| Screen::new(entry.connector.clone(), entry.primary))
            .collect();
        Ok(ScreenTopology::new(screens)?)
    }

    /// The containments as view specs, registering their screens in `pool`.
    pub fn to_view_specs(&self, pool: &mut ScreenPool) -> Vec<ViewSpec> {
        self.containments
            .iter()
            .map(|entry| {
                let screen = entry.screen.as_deref().map(|c| pool.insert_connector(c));
                ViewSpec {
                    id: ViewId(entry.id),
                    screen,
                    last_screen: screen,
                    on_primary: entry.on_primary,
                    edge: entry.edge,
                    visibility: entry.visibility,
                    by_pass_wm: entry.by_pass_wm,
                    preferred_for_shortcuts: entry.preferred_for_shortcuts,
                    dock_capable: entry.dock_capable,
                    layout_id: entry.layout_id.clone(),
                }
            })
            .collect()
    }

    /// Writes placement state back into the matching `[[containments]]`.
    ///
    /// The remembered screen, the on-primary flag (set by forced placement)
    /// and the layout assignment are copied; entries without a spec are left
    /// as they are.
    pub fn store_view_specs(&mut self, specs: &[ViewSpec], pool: &ScreenPool) {
        for entry in &mut self.containments {
            let Some(spec) = specs.iter().find(|spec| spec.id == ViewId(entry.id)) else {
                continue;
            };
            if let Some(connector) = spec.effective_screen().and_then(|id| pool.connector(id)) {
                entry.screen = Some(connector.to_owned());
            }
            entry.on_primary = spec.on_primary;
            entry.layout_id = spec.layout_id.clone();
        }
    }
}

impl TimingsConfig {
    pub fn layout_timings(&self) -> LayoutTimings {
        LayoutTimings {
            recreate_delay: Duration::from_millis(self.recreate_delay_ms),
            recreate_settle: Duration::from_millis(self.recreate_settle_ms),
        }
    }

    /// Hide-views timer interval for `session`.
    pub fn hide_views_interval(&self, session: SessionKind) -> Duration {
        match session {
            SessionKind::X11 => Duration::from_millis(self.hide_views_interval_ms),
            SessionKind::Wayland => Duration::from_millis(self.hide_views_interval_wayland_ms),
        }
    }

    pub fn ghost_mouse_debounce(&self) -> Duration {
        Duration::from_millis(self.ghost_mouse_debounce_ms)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file, returning
/// `AppConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning the defaults if it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to the platform config file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_file_path()?)
}

/// Persists `config` to `path`, creating its directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory, including the `latte-dock` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("latte-dock"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("latte-dock"))
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("latte-dock"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
