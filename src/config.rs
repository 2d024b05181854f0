//! Runtime configuration: defaults, optional YAML file, then environment overrides.
//!
//! ```yaml
//! champions_path: data/champions.json
//! combos_path: data/combos.json
//! output_dir: data/processed
//! workers: 4
//! bind_addr: 127.0.0.1:3000
//! log_filter: info
//! top_combos: 10
//! similarity_threshold: 0.75
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregate::{PipelineOptions, DEFAULT_TOP_COMBOS};
use crate::data::loader::{DEFAULT_CHAMPIONS_PATH, DEFAULT_COMBOS_PATH};
use crate::error::ConfigError;
use crate::parallel::WorkerPool;

pub const CONFIG_ENV: &str = "COMBODEX_CONFIG";
pub const BIND_ENV: &str = "COMBODEX_BIND";
pub const DATA_DIR_ENV: &str = "COMBODEX_DATA_DIR";
pub const WORKERS_ENV: &str = "COMBODEX_WORKERS";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_OUTPUT_DIR: &str = "data/processed";
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub champions_path: PathBuf,
    pub combos_path: PathBuf,
    pub output_dir: PathBuf,
    /// 0 uses every core.
    pub workers: usize,
    pub bind_addr: String,
    pub log_filter: String,
    pub top_combos: usize,
    pub similarity_threshold: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            champions_path: PathBuf::from(DEFAULT_CHAMPIONS_PATH),
            combos_path: PathBuf::from(DEFAULT_COMBOS_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: 0,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_filter: "info".to_string(),
            top_combos: DEFAULT_TOP_COMBOS,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Defaults, then `path` (or `$COMBODEX_CONFIG`) if given, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|name| env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind_addr = bind;
        }
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            let dir = PathBuf::from(dir);
            self.champions_path = dir.join("champions.json");
            self.combos_path = dir.join("combos.json");
        }
        if let Some(raw) = lookup(WORKERS_ENV) {
            self.workers = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: WORKERS_ENV,
                value: raw.clone(),
            })?;
        }
        Ok(())
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            pool: WorkerPool::with_workers(self.workers),
            top_combos: self.top_combos,
        }
    }
}
