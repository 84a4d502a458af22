//! End-to-end runs of the `filestamp` binary with an isolated config path.

use filetime::FileTime;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(config: &Path, args: &[&str]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("filestamp");
    Command::new(me)
        .args(args)
        .env("FILESTAMP_CONFIG", config)
        .output()
        .expect("spawn binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn print_config_names_the_env_path() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let out = run(&cfg, &["--print-config"]);
    assert!(out.status.success(), "binary should succeed with --print-config");
    assert!(stdout(&out).contains(&cfg.display().to_string()));
    // An explicit path is reported, never created.
    assert!(!cfg.exists());
}

#[test]
fn check_name_accepts_and_rejects() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");

    let ok = run(&cfg, &["check-name", "holiday"]);
    assert!(ok.status.success(), "stderr: {}", stderr(&ok));
    assert!(stdout(&ok).contains("'holiday' is a valid name"));

    let bad = run(&cfg, &["check-name", "a|b"]);
    assert!(!bad.status.success());
    assert!(stderr(&bad).contains("invalid character '|' in name"), "stderr: {}", stderr(&bad));
}

#[test]
fn edit_renames_and_stamps() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let draft = td.path().join("draft.txt");
    fs::write(&draft, "body").unwrap();

    let out = run(
        &cfg,
        &[
            "edit",
            draft.to_str().unwrap(),
            "--name",
            "final",
            "--created",
            "2020-01-01T00:00Z",
            "--modified",
            "2020-01-02T00:00Z",
        ],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let final_path = td.path().join("final.txt");
    assert!(!draft.exists());
    assert_eq!(fs::read_to_string(&final_path).unwrap(), "body");
    let meta = fs::metadata(&final_path).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&meta).unix_seconds(), 1_577_923_200);
}

#[test]
fn edit_refuses_existing_name() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let draft = td.path().join("draft.txt");
    fs::write(&draft, "draft").unwrap();
    fs::write(td.path().join("final.txt"), "final").unwrap();

    let out = run(&cfg, &["edit", draft.to_str().unwrap(), "--name", "final", "--now"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("already exists"), "stderr: {}", stderr(&out));
    assert_eq!(fs::read_to_string(&draft).unwrap(), "draft");
    assert_eq!(fs::read_to_string(td.path().join("final.txt")).unwrap(), "final");
}

#[test]
fn edit_dry_run_changes_nothing() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let draft = td.path().join("draft.txt");
    fs::write(&draft, "draft").unwrap();

    let out = run(&cfg, &["--dry-run", "edit", draft.to_str().unwrap(), "--name", "final", "--now"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("Dry-run"));
    assert!(draft.exists());
    assert!(!td.path().join("final.txt").exists());
}

#[test]
fn edit_without_name_keeps_padded_name() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let padded = td.path().join(" notes .txt");
    fs::write(&padded, "x").unwrap();

    let out = run(&cfg, &["edit", padded.to_str().unwrap(), "--now"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(padded.exists());
    assert!(!td.path().join("notes.txt").exists());
}

#[test]
fn show_prints_both_timestamps() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let f = td.path().join("notes.md");
    fs::write(&f, "x").unwrap();

    let out = run(&cfg, &["show", f.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("extension: md"), "{text}");
    assert!(text.contains("created:"), "{text}");
    assert!(text.contains("modified:"), "{text}");
}

#[test]
fn batch_directories_need_recursive() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let dir = td.path().join("photos");
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("a.jpg"), "a").unwrap();
    fs::write(dir.join("b.jpg"), "b").unwrap();
    fs::write(dir.join("nested").join("c.jpg"), "c").unwrap();

    let flat = run(&cfg, &["batch", dir.to_str().unwrap()]);
    assert!(flat.status.success(), "stderr: {}", stderr(&flat));
    assert!(stderr(&flat).contains("--recursive"));

    let deep = run(
        &cfg,
        &["batch", "-r", "--policy", "creation-from-modification", dir.to_str().unwrap()],
    );
    assert!(deep.status.success(), "stderr: {}", stderr(&deep));
    assert!(stdout(&deep).contains("3 files processed"), "{}", stdout(&deep));
    assert!(stderr(&deep).contains("3/3"), "{}", stderr(&deep));
}

#[test]
fn batch_with_failures_exits_non_zero() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let present = td.path().join("present.txt");
    fs::write(&present, "x").unwrap();
    let missing = td.path().join("missing.txt");

    let out = run(&cfg, &["batch", present.to_str().unwrap(), missing.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("2 files processed"));
    assert!(stderr(&out).contains("missing.txt"));
}

#[test]
fn missing_command_is_an_error() {
    let td = tempdir().unwrap();
    let out = run(&td.path().join("config.xml"), &[]);
    assert!(!out.status.success());
}
