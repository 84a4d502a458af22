//! Core value types shared by the updater and the batch pipeline.

use chrono::{DateTime, Utc};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::FileStampError;

/// One filesystem entry being edited.
///
/// `extension` is derived once at construction and carried across renames;
/// only `path` changes, and only after a successful rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub path: PathBuf,
    pub extension: OsString,
}

impl FileTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = path.extension().map(OsStr::to_os_string).unwrap_or_default();
        Self { path, extension }
    }

    /// File name without the extension (`report` for `report.txt`).
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Full file name as shown to the user.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Sibling path that `base_name` would occupy, keeping this target's extension.
    pub fn sibling_for(&self, base_name: &str) -> PathBuf {
        let mut name = OsString::from(base_name);
        if !self.extension.is_empty() {
            name.push(".");
            name.push(&self.extension);
        }
        match self.path.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Same entry after a rename: new path, same extension.
    pub(crate) fn moved_to(&self, path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            extension: self.extension.clone(),
        }
    }
}

/// Creation and modification instants of an entry.
///
/// Values read from disk may be out of order; `validate` is what guards writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampPair {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl TimestampPair {
    pub fn new(created: DateTime<Utc>, modified: DateTime<Utc>) -> Self {
        Self { created, modified }
    }

    /// Both instants set to the current time.
    pub fn now() -> Self {
        let now = Utc::now();
        Self::new(now, now)
    }

    pub fn with_modified_from_created(self) -> Self {
        Self::new(self.created, self.created)
    }

    pub fn with_created_from_modified(self) -> Self {
        Self::new(self.modified, self.modified)
    }

    pub fn is_ordered(&self) -> bool {
        self.created <= self.modified
    }

    pub fn validate(&self) -> Result<(), FileStampError> {
        if self.is_ordered() {
            Ok(())
        } else {
            Err(FileStampError::Validation(
                "creation date after modification date".to_string(),
            ))
        }
    }
}

/// Argument of the attribute write primitive; `None` leaves a timestamp untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeUpdate {
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl From<TimestampPair> for AttributeUpdate {
    fn from(pair: TimestampPair) -> Self {
        Self {
            created: Some(pair.created),
            modified: Some(pair.modified),
        }
    }
}

/// Which timestamp is authoritative when deriving both for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkDatePolicy {
    /// Modification time := creation time.
    #[default]
    ModificationFromCreation,
    /// Creation time := modification time.
    CreationFromModification,
}

impl BulkDatePolicy {
    /// Parse the names used in config files and on the command line (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "modification-from-creation" | "modified-from-created" | "mtime-from-ctime" => {
                Some(BulkDatePolicy::ModificationFromCreation)
            }
            "creation-from-modification" | "created-from-modified" | "ctime-from-mtime" => {
                Some(BulkDatePolicy::CreationFromModification)
            }
            _ => None,
        }
    }

    /// New pair for an entry whose current timestamps are `current`.
    pub fn derive(self, current: TimestampPair) -> TimestampPair {
        match self {
            BulkDatePolicy::ModificationFromCreation => current.with_modified_from_created(),
            BulkDatePolicy::CreationFromModification => current.with_created_from_modified(),
        }
    }
}

impl fmt::Display for BulkDatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BulkDatePolicy::ModificationFromCreation => "modification-from-creation",
            BulkDatePolicy::CreationFromModification => "creation-from-modification",
        })
    }
}

impl FromStr for BulkDatePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid bulk date policy: '{s}'"))
    }
}

/// Result of one batch item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub target: FileTarget,
    pub success: bool,
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn succeeded(target: FileTarget) -> Self {
        Self {
            target,
            success: true,
            error: None,
        }
    }

    pub fn failed(target: FileTarget, error: &FileStampError) -> Self {
        Self {
            target,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.success).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn extension_is_last_component() {
        let t = FileTarget::new("/tmp/archive.tar.gz");
        assert_eq!(t.extension, "gz");
        assert_eq!(t.base_name(), "archive.tar");

        let dotfile = FileTarget::new("/tmp/.env");
        assert_eq!(dotfile.extension, "");
        assert_eq!(dotfile.base_name(), ".env");
    }

    #[test]
    fn sibling_keeps_extension() {
        let t = FileTarget::new("/docs/draft.txt");
        assert_eq!(t.sibling_for("final"), PathBuf::from("/docs/final.txt"));

        let bare = FileTarget::new("/docs/Makefile");
        assert_eq!(bare.sibling_for("Rakefile"), PathBuf::from("/docs/Rakefile"));
    }

    #[test]
    fn pair_ordering() {
        assert!(TimestampPair::new(at(1), at(2)).validate().is_ok());
        assert!(TimestampPair::new(at(2), at(2)).validate().is_ok());
        let err = TimestampPair::new(at(3), at(2)).validate().unwrap_err();
        assert!(matches!(err, FileStampError::Validation(_)));
    }

    #[test]
    fn policy_derivation() {
        let current = TimestampPair::new(at(1), at(5));
        assert_eq!(
            BulkDatePolicy::ModificationFromCreation.derive(current),
            TimestampPair::new(at(1), at(1))
        );
        assert_eq!(
            BulkDatePolicy::CreationFromModification.derive(current),
            TimestampPair::new(at(5), at(5))
        );
    }

    #[test]
    fn policy_parse_and_display() {
        for p in [
            BulkDatePolicy::ModificationFromCreation,
            BulkDatePolicy::CreationFromModification,
        ] {
            assert_eq!(p.to_string().parse::<BulkDatePolicy>(), Ok(p));
        }
        assert_eq!(
            BulkDatePolicy::parse("Created_From_Modified"),
            Some(BulkDatePolicy::CreationFromModification)
        );
        assert!(BulkDatePolicy::parse("sideways").is_none());
    }

    #[test]
    fn summary_counts() {
        let ok = BatchOutcome::succeeded(FileTarget::new("/a.txt"));
        let bad = BatchOutcome::failed(
            FileTarget::new("/b.txt"),
            &FileStampError::filesystem("boom"),
        );
        let s = BatchSummary::from_outcomes(&[ok.clone(), bad, ok]);
        assert_eq!(s, BatchSummary { total: 3, succeeded: 2, failed: 1 });
    }
}
