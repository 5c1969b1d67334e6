//! fleetsnap settings
//!
//! A YAML settings file supplies defaults for the CLI: which credential
//! profile and region to use, which clusters to look at, page size
//! overrides and the output format. Every value is optional and CLI flags
//! win over the file.
//!
//! ```yaml
//! profile: prod
//! region: us-east-1
//! clusters: [web, batch]
//! limits:
//!   services: 10
//!   tasks: 50
//! format: json
//! ```

pub mod error;

pub use error::*;

use fleetsnap_core::FetchLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file directly
pub const CONFIG_PATH_ENV: &str = "FLEETSNAP_CONFIG_PATH";

const LOCAL_FILE: &str = "fleetsnap.yaml";
const PROJECT_DIR: &str = ".fleetsnap";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub profile: Option<String>,
    pub region: Option<String>,
    /// Cluster names or ARNs; empty means every cluster
    pub clusters: Vec<String>,
    pub limits: LimitOverrides,
    /// "table" or "json"
    pub format: Option<String>,
}

/// Partial [`FetchLimits`]; unset fields keep the default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitOverrides {
    pub clusters: Option<u32>,
    pub services: Option<u32>,
    pub tasks: Option<u32>,
    pub container_instances: Option<u32>,
    pub compute_batch: Option<usize>,
}

impl LimitOverrides {
    pub fn apply(&self, base: FetchLimits) -> FetchLimits {
        FetchLimits {
            clusters: self.clusters.unwrap_or(base.clusters),
            services: self.services.unwrap_or(base.services),
            tasks: self.tasks.unwrap_or(base.tasks),
            container_instances: self.container_instances.unwrap_or(base.container_instances),
            compute_batch: self.compute_batch.unwrap_or(base.compute_batch),
        }
    }
}

impl Settings {
    /// Parse settings from YAML text; blank text yields the defaults
    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Limits from the file layered over [`FetchLimits::default`]
    pub fn fetch_limits(&self) -> FetchLimits {
        self.limits.apply(FetchLimits::default())
    }
}

/// Global config directory (`~/.config/fleetsnap`)
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("fleetsnap"))
}

/// Locate the settings file
///
/// Search order:
/// 1. `FLEETSNAP_CONFIG_PATH` (must exist when set)
/// 2. `./fleetsnap.yaml`
/// 3. `./.fleetsnap/config.yaml`
/// 4. `~/.config/fleetsnap/config.yaml`
///
/// Returns `Ok(None)` when no file is present anywhere.
pub fn find_settings_file() -> Result<Option<PathBuf>> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        return Ok(Some(path));
    }

    let current_dir = std::env::current_dir()?;
    Ok(search(&current_dir, get_config_dir().ok().as_deref()))
}

fn search(current_dir: &Path, global_dir: Option<&Path>) -> Option<PathBuf> {
    let local = [
        current_dir.join(LOCAL_FILE),
        current_dir.join(PROJECT_DIR).join(CONFIG_FILE),
    ];
    let global = global_dir.map(|dir| dir.join(CONFIG_FILE));

    local.into_iter().chain(global).find(|path| path.is_file())
}

/// Read and parse one settings file
pub fn load_from(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    Settings::from_yaml_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Discover and load settings, falling back to defaults when no file exists
pub fn load_settings() -> Result<(Settings, Option<PathBuf>)> {
    match find_settings_file()? {
        Some(path) => Ok((load_from(&path)?, Some(path))),
        None => Ok((Settings::default(), None)),
    }
}
