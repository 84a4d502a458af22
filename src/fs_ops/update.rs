//! Single-entry metadata update: validated rename followed by a timestamp write.
//!
//! Ordering:
//! 1. All input checks (name rules, created <= modified). No I/O yet.
//! 2. Collision check and rename. The rename is the only step that can
//!    collide with another entry, so it runs first and gets its own error.
//! 3. Timestamp write on the (possibly new) path.
//!
//! A failure in step 3 after a committed rename is reported, not rolled back:
//! the error carries `renamed_to` and says so in its message.

use chrono::{DateTime, Utc};
use std::io;
use tracing::{debug, info, warn};

use super::helpers::{describe_io_error, io_error_with_help};
use super::primitives::FileSystem;
use crate::errors::FileStampError;
use crate::model::{FileTarget, TimestampPair};
use crate::validator::validate_name;

#[derive(Debug, Clone)]
pub struct MetadataUpdater<F> {
    fs: F,
    dry_run: bool,
}

impl<F: FileSystem> MetadataUpdater<F> {
    pub fn new(fs: F) -> Self {
        Self { fs, dry_run: false }
    }

    /// When set, every check runs but nothing is renamed or written.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Current timestamps of `target`.
    pub fn inspect(&self, target: &FileTarget) -> Result<TimestampPair, FileStampError> {
        self.fs
            .read_attributes(&target.path)
            .map_err(io_error_with_help("read timestamps", &target.path))
    }

    /// Rename `target` to `new_base_name` (extension kept) and stamp it with `times`.
    /// Returns the target at its new location.
    pub fn update(
        &self,
        target: &FileTarget,
        new_base_name: &str,
        times: TimestampPair,
    ) -> Result<FileTarget, FileStampError> {
        validate_name(new_base_name).into_result()?;
        times.validate()?;

        let candidate = target.sibling_for(new_base_name.trim());
        let mut effective = target.clone();
        let renaming = candidate != target.path;

        if renaming {
            let candidate_name = candidate
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.fs.path_exists(&candidate) {
                debug!(dest = %candidate.display(), "rename target already taken");
                return Err(FileStampError::AlreadyExists(candidate_name));
            }

            if self.dry_run {
                info!(src = %target.path.display(), dest = %candidate.display(), "dry-run: would rename");
            } else {
                self.fs
                    .move_path(&target.path, &candidate)
                    .map_err(|e| match e.kind() {
                        io::ErrorKind::AlreadyExists => {
                            FileStampError::AlreadyExists(candidate_name.clone())
                        }
                        _ => io_error_with_help("rename", &target.path)(e),
                    })?;
                info!(src = %target.path.display(), dest = %candidate.display(), "Renamed");
            }
            effective = target.moved_to(&candidate);
        }

        self.write_times(target, effective, renaming, times)
    }

    /// Stamp `target` with `times` where it is. The name is neither checked nor
    /// touched, so entries whose names would not pass validation (or are not
    /// valid UTF-8) keep them byte for byte.
    pub fn stamp(&self, target: &FileTarget, times: TimestampPair) -> Result<FileTarget, FileStampError> {
        times.validate()?;
        self.write_times(target, target.clone(), false, times)
    }

    fn write_times(
        &self,
        original: &FileTarget,
        effective: FileTarget,
        renamed: bool,
        times: TimestampPair,
    ) -> Result<FileTarget, FileStampError> {
        if self.dry_run {
            info!(
                path = %effective.path.display(),
                created = %times.created,
                modified = %times.modified,
                "dry-run: would write timestamps"
            );
            return Ok(effective);
        }

        if let Err(e) = self.fs.write_attributes(&effective.path, &times.into()) {
            let cause = describe_io_error("write timestamps", &effective.path, &e);
            let err = if renamed {
                warn!(
                    src = %original.path.display(),
                    dest = %effective.path.display(),
                    error = %e,
                    "rename committed but timestamp write failed"
                );
                FileStampError::renamed_but_not_stamped(&original.path, &effective.path, &cause)
            } else {
                FileStampError::filesystem(cause)
            };
            return Err(err);
        }

        info!(
            path = %effective.path.display(),
            created = %times.created,
            modified = %times.modified,
            "Timestamps written"
        );
        Ok(effective)
    }

    /// Like `update`, with the modification time set to now.
    pub fn update_created(
        &self,
        target: &FileTarget,
        new_base_name: &str,
        created: DateTime<Utc>,
    ) -> Result<FileTarget, FileStampError> {
        self.update(target, new_base_name, TimestampPair::new(created, Utc::now()))
    }
}
