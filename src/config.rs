//! Configuration for where the catalogs come from.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags, or their environment variables
//!    (GOC_BASE_URL, GOC_DATA_DIR, GOC_FETCH_TIMEOUT), applied with
//!    [`ResolvedConfig::with_overrides`]
//! 2. Config file (.goc/config.yaml)
//! 3. Defaults (site root `.`, 10s fetch timeout, `reset` filter policy)
//!
//! Config file discovery:
//! - Searches current directory and parents for .goc/config.yaml
//! - Falls back to the user config directory (goc/config.yaml)
//! - A relative `data_dir` is resolved against the project root (the parent of .goc/)

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::{CatalogSource, FileSource, HttpSource, ResourcePaths};
use crate::core::FilterPolicy;
use crate::library::{CatalogStore, DEFAULT_FETCH_TIMEOUT};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const CONFIG_DIR: &str = ".goc";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
    #[serde(default)]
    pub tabs: Option<TabsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    /// Site base URL; wins over `data_dir`
    pub base_url: Option<String>,
    /// Site root on disk (relative to the project root)
    pub data_dir: Option<String>,
    pub videos_path: Option<String>,
    pub readings_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TabsConfig {
    pub filter_policy: Option<FilterPolicy>,
}

/// Where the site lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Http(String),
    Directory(PathBuf),
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Http(url) => write!(f, "{}", url),
            SourceLocation::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub source: SourceLocation,
    /// Relative paths of the two catalogs
    pub paths: ResourcePaths,
    pub fetch_timeout: Duration,
    pub filter_policy: FilterPolicy,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source: SourceLocation::Directory(PathBuf::from(".")),
            paths: ResourcePaths::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            filter_policy: FilterPolicy::default(),
            config_file: None,
        }
    }
}

impl ResolvedConfig {
    /// Apply command-line values on top of the file/defaults
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(ref url) = overrides.base_url {
            self.source = SourceLocation::Http(url.clone());
        } else if let Some(ref dir) = overrides.data_dir {
            self.source = SourceLocation::Directory(dir.clone());
        }

        if let Some(seconds) = overrides.timeout_seconds {
            self.fetch_timeout = timeout_from_secs(seconds)?;
        }

        Ok(self)
    }

    /// Build the catalog source this config points at
    pub fn build_source(&self) -> Result<Arc<dyn CatalogSource>> {
        Ok(match &self.source {
            SourceLocation::Http(url) => Arc::new(HttpSource::new(url, self.paths.clone())?),
            SourceLocation::Directory(dir) => {
                Arc::new(FileSource::new(dir.clone(), self.paths.clone()))
            }
        })
    }

    /// Build a fresh catalog store for this session
    pub fn build_store(&self) -> Result<CatalogStore> {
        Ok(CatalogStore::new(self.build_source()?).with_timeout(self.fetch_timeout))
    }
}

fn timeout_from_secs(seconds: u64) -> Result<Duration> {
    if seconds == 0 {
        anyhow::bail!("Fetch timeout must be at least one second");
    }
    Ok(Duration::from_secs(seconds))
}

/// Find config file by searching `start` and its parents
fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Project config first, then the user's config directory
fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd).or_else(|| {
        let user = dirs::config_dir()?.join("goc").join(CONFIG_FILE);
        user.exists().then_some(user)
    })
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Directory relative paths in a config file are resolved against
fn base_dir(config_path: &Path) -> &Path {
    let dir = config_path.parent().unwrap_or(Path::new("."));
    if dir.file_name().is_some_and(|name| name == CONFIG_DIR) {
        // .goc/ -> project root
        dir.parent().unwrap_or(dir)
    } else {
        dir
    }
}

/// Resolve configuration from an optional config file
fn load_config_from(config_file: Option<PathBuf>) -> Result<ResolvedConfig> {
    let Some(config_path) = config_file else {
        return Ok(ResolvedConfig::default());
    };

    let config = load_config_file(&config_path)?;
    let base = base_dir(&config_path);

    let source = if let Some(url) = config.source.base_url {
        SourceLocation::Http(url)
    } else if let Some(ref dir) = config.source.data_dir {
        SourceLocation::Directory(resolve_path(base, dir))
    } else {
        SourceLocation::Directory(base.to_path_buf())
    };

    let defaults = ResourcePaths::default();
    let paths = ResourcePaths {
        videos: config.source.videos_path.unwrap_or(defaults.videos),
        readings: config.source.readings_path.unwrap_or(defaults.readings),
    };

    let fetch_timeout = match config.fetch.and_then(|f| f.timeout_seconds) {
        Some(seconds) => timeout_from_secs(seconds)
            .with_context(|| {
                format!("Invalid fetch.timeout_seconds in {}", config_path.display())
            })?,
        None => DEFAULT_FETCH_TIMEOUT,
    };

    let filter_policy = config
        .tabs
        .and_then(|t| t.filter_policy)
        .unwrap_or_default();

    Ok(ResolvedConfig {
        source,
        paths,
        fetch_timeout,
        filter_policy,
        config_file: Some(config_path),
    })
}

/// Load configuration from all file sources
fn load_config() -> Result<ResolvedConfig> {
    load_config_from(find_config_file())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
