//! Default path helpers.
//! Resolves the config file location (honouring FILESTAMP_CONFIG) and the log
//! file location next to it.

use anyhow::{Context, Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::path::PathBuf;

use super::CONFIG_ENV;

/// Config file path: `$FILESTAMP_CONFIG` (a file, or a directory containing
/// `config.xml`; relative values resolve against the working directory), else
/// the OS config dir.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV) {
        let mut p = PathBuf::from(raw);
        if p.is_relative() {
            p = env::current_dir()
                .context("resolve working directory for relative FILESTAMP_CONFIG")?
                .join(p);
        }
        if p.is_dir() {
            p.push("config.xml");
        }
        return Ok(p);
    }
    config_dir()
        .map(|base| base.join("filestamp").join("config.xml"))
        .ok_or_else(|| anyhow!("could not determine a config directory for this user"))
}

/// Log file path: next to an explicit FILESTAMP_CONFIG, else the OS data dir.
pub fn default_log_path() -> Result<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        let cfg = default_config_path()?;
        let dir = cfg
            .parent()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("config path '{}' has no parent", cfg.display()))?;
        return Ok(dir.join("filestamp.log"));
    }
    data_dir()
        .map(|base| base.join("filestamp").join("filestamp.log"))
        .ok_or_else(|| anyhow!("could not determine a data directory for this user"))
}
