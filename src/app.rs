//! Application orchestrator.
//! Loads/merges config, initializes logging, and dispatches to the selected
//! command. Results go to stdout; logs and progress go to stderr.

use anyhow::{Context, Result, anyhow, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;

use filestamp::cli::{Args, BatchArgs, Command, EditArgs, sanitize_path};
use filestamp::config::{CONFIG_ENV, LoadResult, load_or_init};
use filestamp::output as out;
use filestamp::timestamp::{display_local, parse_timestamp};
use filestamp::{
    BatchProcessor, BatchSummary, BulkDatePolicy, Config, FileStampError, FileTarget,
    MetadataUpdater, StdFileSystem, TimestampPair, default_config_path, spawn_batch,
    validate_name,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let mut cfg = match load_or_init()? {
        LoadResult::Loaded(cfg, path) => {
            debug!(config = %path.display(), "config loaded");
            cfg
        }
        LoadResult::Defaults => Config::default(),
        LoadResult::CreatedTemplate(path) => {
            out::print_info(&format!(
                "A template filestamp config was written to: {}",
                path.display()
            ));
            Config::default()
        }
    };
    args.apply_overrides(&mut cfg);

    // Held until exit so the file appender flushes.
    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!("Starting filestamp: {:?}", args);

    match args.command.as_ref() {
        Some(Command::Show { paths }) => show(paths),
        Some(Command::Edit(edit_args)) => edit(&cfg, edit_args),
        Some(Command::Batch(batch_args)) => batch(&cfg, batch_args),
        Some(Command::CheckName { name }) => check_name(name),
        None => bail!("no command given; run `filestamp --help` for usage"),
    }
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default filestamp config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run any command to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}

/// Log a library error with its code and kind, then hand it to anyhow.
fn report(op: &str, path: &Path, e: FileStampError) -> anyhow::Error {
    let code = e.code();
    match &e {
        FileStampError::Filesystem { renamed_to: Some(dest), .. } => {
            error!(code, kind = e.kind(), path = %path.display(), dest = %dest.display(), "{op} partially applied")
        }
        _ => error!(code, kind = e.kind(), path = %path.display(), error = %e, "{op} failed"),
    }
    anyhow!(e)
}

fn resolve_target(raw: &Path) -> Result<FileTarget> {
    let cleaned = sanitize_path(raw);
    let path = dunce::canonicalize(&cleaned)
        .with_context(|| format!("cannot resolve '{}'", cleaned.display()))?;
    Ok(FileTarget::new(path))
}

fn show(paths: &[PathBuf]) -> Result<()> {
    let updater = MetadataUpdater::new(StdFileSystem::new());
    let mut failures = 0usize;
    for raw in paths {
        let target = match resolve_target(raw) {
            Ok(t) => t,
            Err(e) => {
                out::print_error(&format!("{e:#}"));
                failures += 1;
                continue;
            }
        };
        match updater.inspect(&target) {
            Ok(times) => {
                out::print_user(&target.path.display().to_string());
                out::print_user(&format!("  name:      {}", target.file_name()));
                out::print_user(&format!("  base name: {}", target.base_name()));
                out::print_user(&format!("  extension: {}", target.extension.to_string_lossy()));
                out::print_user(&format!("  created:   {}", display_local(&times.created)));
                out::print_user(&format!("  modified:  {}", display_local(&times.modified)));
            }
            Err(e) => {
                out::print_error(&e.to_string());
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{failures} of {} paths could not be shown", paths.len());
    }
    Ok(())
}

fn edit(cfg: &Config, args: &EditArgs) -> Result<()> {
    let target = resolve_target(&args.path)?;
    if !StdFileSystem::is_accessible(&target.path) {
        bail!(
            "'{}' is not an accessible regular file (missing, unreadable or read-only)",
            target.path.display()
        );
    }

    let fs = StdFileSystem::new().require_creation_time(cfg.require_creation_time);
    let updater = MetadataUpdater::new(fs).dry_run(cfg.dry_run);
    let current = updater
        .inspect(&target)
        .map_err(|e| report("read timestamps", &target.path, e))?;

    let mut times = current;
    if let Some(s) = args.created.as_deref() {
        times.created = parse_timestamp(s).map_err(|e| anyhow!("--created: {e}"))?;
    }
    if let Some(s) = args.modified.as_deref() {
        times.modified = parse_timestamp(s).map_err(|e| anyhow!("--modified: {e}"))?;
    }
    if args.now {
        times = TimestampPair::now();
    } else if args.modified_from_created {
        times = times.with_modified_from_created();
    } else if args.created_from_modified {
        times = times.with_created_from_modified();
    }

    let updated = match args.name.as_deref() {
        Some(name) => updater.update(&target, name, times),
        None => updater.stamp(&target, times),
    }
    .map_err(|e| report("edit", &target.path, e))?;

    let verb = if cfg.dry_run { "Dry-run: would update" } else { "Updated" };
    if updated.path != target.path {
        out::print_success(&format!(
            "{verb} '{}' -> '{}'",
            target.path.display(),
            updated.path.display()
        ));
    } else {
        out::print_success(&format!("{verb} '{}'", updated.path.display()));
    }
    out::print_user(&format!("  created:  {}", display_local(&times.created)));
    out::print_user(&format!("  modified: {}", display_local(&times.modified)));
    Ok(())
}

/// Expand command-line paths into batch targets. Directories contribute their
/// regular files (sorted) only when `recursive` is set.
fn collect_targets(paths: &[PathBuf], recursive: bool) -> Result<Vec<FileTarget>> {
    let mut targets = Vec::new();
    for raw in paths {
        let path = sanitize_path(raw);
        if path.is_dir() {
            if !recursive {
                out::print_warn(&format!(
                    "Skipping directory '{}' (use --recursive to include its files)",
                    path.display()
                ));
                continue;
            }
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry = entry.with_context(|| format!("walk '{}'", path.display()))?;
                if entry.file_type().is_file() {
                    targets.push(FileTarget::new(entry.into_path()));
                }
            }
        } else {
            targets.push(FileTarget::new(path));
        }
    }
    Ok(targets)
}

fn batch(cfg: &Config, args: &BatchArgs) -> Result<()> {
    let policy = match args.policy.as_deref() {
        Some(s) => s.parse::<BulkDatePolicy>().map_err(anyhow::Error::msg)?,
        None => cfg.bulk_policy,
    };
    let targets = collect_targets(&args.paths, args.recursive)?;
    if targets.is_empty() {
        out::print_warn("No files to process.");
        return Ok(());
    }

    let fs = StdFileSystem::new().require_creation_time(cfg.require_creation_time);
    let processor = BatchProcessor::new(MetadataUpdater::new(fs).dry_run(cfg.dry_run));
    let handle = spawn_batch(processor, targets, policy).context("start batch worker")?;
    let (outcomes, _processor) = handle.finish(out::print_progress);

    let summary = BatchSummary::from_outcomes(&outcomes);
    info!(total = summary.total, failed = summary.failed, %policy, "batch finished");
    out::print_success(&format!("{} files processed", summary.total));
    for failed in outcomes.iter().filter(|o| !o.success) {
        out::print_error(&format!(
            "{}: {}",
            failed.target.path.display(),
            failed.error.as_deref().unwrap_or("unknown error")
        ));
    }
    if summary.failed > 0 {
        bail!("{} of {} files failed", summary.failed, summary.total);
    }
    Ok(())
}

fn check_name(name: &str) -> Result<()> {
    let result = validate_name(name);
    if result.valid {
        out::print_success(&format!("'{}' is a valid name", name.trim()));
        Ok(())
    } else {
        bail!(result.error_message.unwrap_or_else(|| "invalid name".into()))
    }
}
