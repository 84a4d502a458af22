//! CLI definition and parsing.
//! Global flags live on `Args`; each operation is a subcommand.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Paths wrapped in a stray pair of shell quotes are unwrapped before use.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Rename files and rewrite their creation/modification timestamps"
)]
pub struct Args {
    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Validate and report, but do not rename or write anything.
    #[arg(long, global = true, help = "Show what would be done, but do not modify files")]
    pub dry_run: bool,

    /// Fail instead of warning when creation time cannot be set on this platform.
    #[arg(long, global = true, help = "Fail when the platform cannot set creation time")]
    pub require_creation_time: bool,

    /// Print where filestamp looks for its config file, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show name and timestamps of one or more files.
    Show {
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        paths: Vec<PathBuf>,
    },
    /// Rename a file and/or set its timestamps.
    Edit(EditArgs),
    /// Align timestamps of many files according to a policy. Never renames.
    Batch(BatchArgs),
    /// Check whether a name would be accepted.
    CheckName { name: String },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EditArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    pub path: PathBuf,

    /// New base name; the extension is kept.
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New creation time (RFC 3339, 'YYYY-MM-DD HH:MM', 'YYYY-MM-DD' or 'now').
    #[arg(long, short = 'c')]
    pub created: Option<String>,

    /// New modification time (same formats as --created).
    #[arg(long, short = 'm')]
    pub modified: Option<String>,

    /// Set both timestamps to the current time.
    #[arg(long, conflicts_with_all = ["modified_from_created", "created_from_modified"])]
    pub now: bool,

    /// Copy the creation time into the modification time.
    #[arg(long, conflicts_with = "created_from_modified")]
    pub modified_from_created: bool,

    /// Copy the modification time into the creation time.
    #[arg(long)]
    pub created_from_modified: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BatchArgs {
    #[arg(required = true, value_hint = ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// modification-from-creation | creation-from-modification (default from config).
    #[arg(long, short = 'p')]
    pub policy: Option<String>,

    /// Expand directories to the regular files below them.
    #[arg(long, short = 'r')]
    pub recursive: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.require_creation_time {
            cfg.require_creation_time = true;
        }
    }
}

/// Undo shell quoting mistakes (PowerShell/CMD): drop one pair of matching
/// quotes that wraps the whole path, then one trailing separator. Anything
/// else, including leading/trailing spaces and non-UTF-8 bytes, is kept.
pub fn sanitize_path(p: &Path) -> PathBuf {
    #[cfg(unix)]
    {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        PathBuf::from(OsStr::from_bytes(strip_shell_residue(p.as_os_str().as_bytes())))
    }
    #[cfg(not(unix))]
    {
        match p.to_str() {
            Some(s) => std::str::from_utf8(strip_shell_residue(s.as_bytes()))
                .map(PathBuf::from)
                .unwrap_or_else(|_| p.to_path_buf()),
            None => p.to_path_buf(),
        }
    }
}

// Only ASCII bytes are removed, so UTF-8 input stays UTF-8.
fn strip_shell_residue(mut b: &[u8]) -> &[u8] {
    if let [first @ (b'"' | b'\''), .., last] = b
        && first == last
    {
        b = &b[1..b.len() - 1];
    }
    if let [.., last] = b
        && b.len() > 1
        && std::path::is_separator(*last as char)
    {
        b = &b[..b.len() - 1];
    }
    b
}

pub fn parse() -> Args {
    Args::parse()
}
