//! Config discovery through FILESTAMP_CONFIG. Tests mutate the process
//! environment, so they run serially.

use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use filestamp::config::{CONFIG_ENV, LoadResult, load_or_init};
use filestamp::{BulkDatePolicy, LogLevel, default_config_path, default_log_path};

fn set_env(value: &std::path::Path) {
    unsafe {
        std::env::set_var(CONFIG_ENV, value);
    }
}

fn clear_env() {
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
}

#[test]
#[serial]
fn explicit_file_is_used_and_log_colocates() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("custom.xml");
    set_env(&cfg);

    assert_eq!(default_config_path().unwrap(), cfg);
    assert_eq!(default_log_path().unwrap().parent(), cfg.parent());

    clear_env();
}

#[test]
#[serial]
fn explicit_directory_means_config_xml_inside() {
    let td = tempdir().unwrap();
    set_env(td.path());
    assert_eq!(default_config_path().unwrap(), td.path().join("config.xml"));
    clear_env();
}

#[test]
#[serial]
fn missing_explicit_file_is_not_created() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("absent.xml");
    set_env(&cfg);

    assert!(matches!(load_or_init().unwrap(), LoadResult::Defaults));
    assert!(!cfg.exists());

    clear_env();
}

#[test]
#[serial]
fn explicit_file_is_loaded() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(
        &cfg,
        r#"<config>
  <log_level>debug</log_level>
  <bulk_policy>creation_from_modification</bulk_policy>
  <require_creation_time>true</require_creation_time>
  <dry_run>true</dry_run>
</config>"#,
    )
    .unwrap();
    set_env(&cfg);

    match load_or_init().unwrap() {
        LoadResult::Loaded(c, path) => {
            assert_eq!(path, cfg);
            assert_eq!(c.log_level, LogLevel::Debug);
            assert_eq!(c.bulk_policy, BulkDatePolicy::CreationFromModification);
            assert!(c.require_creation_time);
            assert!(c.dry_run);
            assert!(c.log_file.is_none());
        }
        other => panic!("expected a loaded config, got {other:?}"),
    }

    clear_env();
}

#[test]
#[serial]
fn relative_value_resolves_against_cwd() {
    set_env(std::path::Path::new("relative-filestamp.xml"));
    let resolved = default_config_path().unwrap();
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("relative-filestamp.xml"));
    clear_env();
}
