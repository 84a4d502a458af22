//! `--json` log lines on stderr, and the optional log file.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn json_logs_are_one_object_per_line() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let f = td.path().join("draft.txt");
    fs::write(&f, "x").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("filestamp");
    let out = Command::new(me)
        .args(["--json", "edit", f.to_str().unwrap(), "--name", "final", "--now"])
        .env("FILESTAMP_CONFIG", &cfg)
        .output()
        .expect("spawn binary");
    assert!(out.status.success());

    let stderr = String::from_utf8_lossy(&out.stderr);
    let events: Vec<serde_json::Value> = stderr
        .lines()
        .filter(|l| l.trim_start().starts_with('{'))
        .map(|l| serde_json::from_str(l).expect("valid JSON log line"))
        .collect();
    assert!(!events.is_empty(), "no JSON lines in: {stderr}");
    assert!(
        events
            .iter()
            .any(|e| e["fields"]["message"] == "Renamed" && e["level"] == "INFO"),
        "{stderr}"
    );
}

#[test]
fn log_file_from_config_receives_events() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let log = base.join("filestamp.log");
    let cfg = base.join("config.xml");
    fs::write(
        &cfg,
        format!("<config><log_level>normal</log_level><log_file>{}</log_file></config>", log.display()),
    )
    .unwrap();
    let f = base.join("a.txt");
    fs::write(&f, "x").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("filestamp");
    let out = Command::new(me)
        .args(["edit", f.to_str().unwrap(), "--now"])
        .env("FILESTAMP_CONFIG", &cfg)
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let contents = fs::read_to_string(&log).expect("log file written");
    assert!(contents.contains("Timestamps written"), "{contents}");
}
