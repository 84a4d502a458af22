//! Real-disk filesystem primitives.
//!
//! - Modification time is written with `filetime`, leaving access time as is.
//! - Creation time goes through `platform::set_creation_time`. Where the
//!   platform cannot set it, the write either fails (`require_creation_time`)
//!   or logs a warning and keeps the modification half.
//! - Creation time that cannot be read falls back to the modification time.

use chrono::{DateTime, Utc};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, trace, warn};

use super::atomic::try_atomic_move;
use super::primitives::FileSystem;
use crate::model::{AttributeUpdate, TimestampPair};
use crate::platform;

#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem {
    require_creation_time: bool,
}

impl StdFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat an unsettable creation time as an error instead of a warning.
    pub fn require_creation_time(mut self, require: bool) -> Self {
        self.require_creation_time = require;
        self
    }

    /// True if `path` is an existing regular file we can read and write.
    pub fn is_accessible(path: &Path) -> bool {
        let meta = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "access probe: stat failed");
                return false;
            }
        };
        if !meta.is_file() {
            debug!(path = %path.display(), "access probe: not a regular file");
            return false;
        }
        if meta.permissions().readonly() {
            debug!(path = %path.display(), "access probe: read-only");
            return false;
        }
        fs::File::open(path).is_ok()
    }
}

impl FileSystem for StdFileSystem {
    fn read_attributes(&self, path: &Path) -> io::Result<TimestampPair> {
        let meta = fs::metadata(path)?;
        let modified = meta.modified()?;
        let created = match meta.created() {
            Ok(c) => c,
            Err(e) => {
                trace!(path = %path.display(), error = %e, "creation time unavailable; using modification time");
                modified
            }
        };
        Ok(TimestampPair::new(to_utc(created), to_utc(modified)))
    }

    fn write_attributes(&self, path: &Path, update: &AttributeUpdate) -> io::Result<()> {
        // Creation first: on macOS an mtime older than crtime drags crtime back.
        if let Some(created) = update.created {
            match platform::set_creation_time(path, SystemTime::from(created)) {
                Ok(()) => trace!(path = %path.display(), %created, "set creation time"),
                Err(e) if e.kind() == io::ErrorKind::Unsupported && !self.require_creation_time => {
                    warn!(path = %path.display(), %created, "creation time cannot be set on this platform; only the modification time is written");
                }
                Err(e) => return Err(e),
            }
        }
        if let Some(modified) = update.modified {
            set_file_mtime(path, FileTime::from_system_time(SystemTime::from(modified)))?;
            trace!(path = %path.display(), %modified, "set modification time");
        }
        Ok(())
    }

    fn move_path(&self, from: &Path, to: &Path) -> io::Result<()> {
        try_atomic_move(from, to)
    }

    fn path_exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }
}

fn to_utc(t: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(t)
}
