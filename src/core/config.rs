//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navkit/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::navigation::{
    CallToAction, DEFAULT_BREAKPOINT, NavigationConfig, NavigationItem, default_items,
};
use crate::core::scroll::SCROLL_THRESHOLD;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavkitConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigation: NavigationSection,
    /// Theme token overrides, e.g. `electric_blue = "#3399ff"`.
    #[serde(default)]
    pub theme: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub reduced_motion: Option<bool>,
    pub breakpoint: Option<u16>,
    pub scroll_threshold: Option<u16>,
    pub initial_path: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationSection {
    pub items: Option<Vec<NavigationItem>>,
    pub cta: Option<CallToAction>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_INITIAL_PATH: &str = "/";

pub const BREAKPOINT_ENV: &str = "NAVKIT_BREAKPOINT";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` follows the live environment preference.
    pub reduced_motion: Option<bool>,
    pub initial_path: String,
    pub navigation: NavigationConfig,
    pub theme: BTreeMap<String, String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&NavkitConfig::default(), &CliOverrides::default())
    }
}

/// Values taken from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub reduced_motion: bool,
    pub breakpoint: Option<u16>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.navkit/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navkit").join("config.toml"))
}

/// Load config from `explicit` or `~/.navkit/config.toml`.
///
/// A missing default file is generated (commented out) and defaults are
/// returned. A missing explicit file is an error. A malformed file returns
/// `ConfigError::Parse`.
pub fn load_config(explicit: Option<&Path>) -> Result<NavkitConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NavkitConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NavkitConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<NavkitConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<NavkitConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r##"# navkit configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# reduced_motion = true          # Omit to follow NAVKIT_REDUCED_MOTION
# breakpoint = 100               # Columns; at or below this the menu toggle is shown
# scroll_threshold = 50          # Rows scrolled before the navbar elevates
# initial_path = "/"

# [[navigation.items]]
# label = "Home"
# path = "/"

# [[navigation.items]]
# label = "Services"
# path = "/services"

# [navigation.cta]
# label = "Contact Us"
# path = "/contact"
# control = { variant = "primary", size = "md" }

# [theme]
# electric_blue = "#0070ff"
# button_primary = "#6a0dad"
"##;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NavkitConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Reduced motion: CLI flag forces it on; config may force either way;
    // otherwise the live environment decides.
    let reduced_motion = if cli.reduced_motion {
        Some(true)
    } else {
        config.general.reduced_motion
    };

    // Breakpoint: CLI → env → config → default
    let breakpoint = cli
        .breakpoint
        .or_else(|| {
            std::env::var(BREAKPOINT_ENV)
                .ok()
                .and_then(|v| parse_breakpoint(&v))
        })
        .or(config.general.breakpoint)
        .unwrap_or(DEFAULT_BREAKPOINT);

    let items = match config.navigation.items.as_ref() {
        Some(items) if !items.is_empty() => items.clone(),
        Some(_) => {
            warn!("Empty navigation item list in config, using defaults");
            default_items()
        }
        None => default_items(),
    };

    ResolvedConfig {
        reduced_motion,
        initial_path: config
            .general
            .initial_path
            .clone()
            .unwrap_or_else(|| DEFAULT_INITIAL_PATH.to_string()),
        navigation: NavigationConfig {
            items,
            cta: config.navigation.cta.clone().unwrap_or_default(),
            breakpoint,
            scroll_threshold: config.general.scroll_threshold.unwrap_or(SCROLL_THRESHOLD),
        },
        theme: config.theme.clone(),
    }
}

fn parse_breakpoint(value: &str) -> Option<u16> {
    match value.trim().parse() {
        Ok(columns) => Some(columns),
        Err(e) => {
            warn!("Ignoring {BREAKPOINT_ENV}={value:?}: {e}");
            None
        }
    }
}
