use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::credentials::{HASH_COST, MAX_HASH_COST, MIN_HASH_COST};

const APP_NAME: &str = "luxurywheels";
const CONFIG_FILE: &str = "seed.yaml";

pub const DEFAULT_DATABASE: &str = "LuxuryWheels.db";
pub const DEFAULT_COUNT: usize = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    pub database: PathBuf,
    pub count: usize,
    pub hash_cost: u32,
    /// Fresh rows drawn per entity when an email collides.
    pub max_attempts: u32,
    pub rng_seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            count: DEFAULT_COUNT,
            hash_cost: HASH_COST,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rng_seed: None,
            log_file: None,
        }
    }
}

impl SeedConfig {
    pub fn from_yaml(data: &[u8]) -> Result<Self> {
        let config: SeedConfig = serde_yaml::from_slice(data)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.hash_cost) {
            bail!(
                "hash_cost must be between {MIN_HASH_COST} and {MAX_HASH_COST}, got {}",
                self.hash_cost
            );
        }
        if self.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }
        Ok(())
    }
}

/// Return the application config directory path. Unlike a writer, the seeder
/// never creates it.
pub fn get_app_config_path() -> Result<PathBuf> {
    let mut path = if cfg!(target_os = "macos") {
        dirs_next::home_dir().map(|h| h.join(".config"))
    } else {
        dirs_next::config_dir()
    }
    .ok_or_else(|| anyhow::anyhow!("failed to find os config dir."))?;

    path.push(APP_NAME);
    Ok(path)
}

fn read_config(path: &Path) -> Result<SeedConfig> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    SeedConfig::from_yaml(&data)
        .with_context(|| format!("failed to parse YAML at {}", path.display()))
}

/// Load the seeding configuration. An explicit path must exist; otherwise the
/// file under the app config dir is used when present, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<SeedConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let Ok(dir) = get_app_config_path() else {
        return Ok(SeedConfig::default());
    };
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(SeedConfig::default());
    }
    read_config(&path)
}
