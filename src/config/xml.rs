//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template when the default file is missing; an explicit
//!   FILESTAMP_CONFIG path is never created.
//! - Unknown fields are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::CONFIG_ENV;
use super::paths::{default_config_path, default_log_path};
use super::types::{Config, LogLevel};
use crate::model::BulkDatePolicy;
use crate::platform::{path_has_symlink_ancestor, set_dir_mode_0700, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    dry_run: Option<bool>,
    bulk_policy: Option<String>,
    require_creation_time: Option<bool>,
}

/// What `load_or_init` found.
#[derive(Debug)]
pub enum LoadResult {
    /// Parsed config and the file it came from.
    Loaded(Config, PathBuf),
    /// No file (explicit path missing); built-in defaults apply.
    Defaults,
    /// Default file was missing and a template was written there.
    CreatedTemplate(PathBuf),
}

fn xml_to_config(parsed: XmlConfig, source: &Path) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("config '{}'", source.display()))?;
    }
    if let Some(s) = parsed.log_file.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(s) = parsed.bulk_policy.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        cfg.bulk_policy = s
            .parse::<BulkDatePolicy>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("config '{}'", source.display()))?;
    }
    cfg.dry_run = parsed.dry_run.unwrap_or(false);
    cfg.require_creation_time = parsed.require_creation_time.unwrap_or(false);
    Ok(cfg)
}

/// Load a Config from a specific XML file.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed, path)
}

/// Resolve the config path, load it if present, otherwise seed a template at
/// the default location.
pub fn load_or_init() -> Result<LoadResult> {
    let path = default_config_path()?;
    if path.exists() {
        let cfg = load_config_from_xml_path(&path)?;
        return Ok(LoadResult::Loaded(cfg, path));
    }
    if env::var_os(CONFIG_ENV).is_some() {
        return Ok(LoadResult::Defaults);
    }
    create_template_config(&path)?;
    Ok(LoadResult::CreatedTemplate(path))
}

/// Create the template config file and its parent directory (0700/0600 on Unix).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if path.exists() {
        bail!("Refusing to overwrite existing config at {}", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let log_hint = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/filestamp.log".into());
    let content = format!(
        "<!--\n  filestamp configuration (XML)\n\n    log_level              -> quiet | normal | info | debug\n    log_file               -> path to a log file (optional; stderr is always used)\n    bulk_policy            -> modification-from-creation | creation-from-modification\n    require_creation_time  -> true: fail when the platform cannot set creation time\n    dry_run                -> true: check and report, never modify files\n\n  CLI flags override XML values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <bulk_policy>{}</bulk_policy>\n  <require_creation_time>false</require_creation_time>\n  <dry_run>false</dry_run>\n  <!-- <log_file>{}</log_file> -->\n</config>\n",
        BulkDatePolicy::default(),
        log_hint
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_parses_back_to_defaults() {
        let dir = tempdir().unwrap();
        let base = fs::canonicalize(dir.path()).unwrap();
        let path = base.join("sub").join("config.xml");
        create_template_config(&path).unwrap();
        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.xml");
        fs::write(&path, "<config><colour>red</colour></config>").unwrap();
        assert!(load_config_from_xml_path(&path).is_err());
    }

    #[test]
    fn bad_policy_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.xml");
        fs::write(&path, "<config><bulk_policy>sideways</bulk_policy></config>").unwrap();
        let err = format!("{:#}", load_config_from_xml_path(&path).unwrap_err());
        assert!(err.contains("sideways"), "{err}");
        assert!(err.contains("config.xml"), "{err}");
    }
}
