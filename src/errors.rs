//! Typed error definitions for filestamp.
//! Three failure modes cover every way a metadata update can go wrong; each
//! carries enough context (offending character, colliding name, I/O cause) to
//! show the user a precise message.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileStampError {
    /// Bad name or bad date ordering. Nothing was touched.
    #[error("{0}")]
    Validation(String),

    /// The destination name is already taken. Nothing was touched.
    #[error("an entry named '{0}' already exists")]
    AlreadyExists(String),

    /// A filesystem primitive failed. When `renamed_to` is set the rename had
    /// already committed and only the timestamp write failed.
    #[error("{message}")]
    Filesystem {
        message: String,
        renamed_to: Option<PathBuf>,
    },
}

impl FileStampError {
    /// Plain I/O failure with no partial mutation.
    pub fn filesystem(message: impl Into<String>) -> Self {
        FileStampError::Filesystem {
            message: message.into(),
            renamed_to: None,
        }
    }

    /// Attribute write failed after the entry was already moved to `renamed_to`.
    pub fn renamed_but_not_stamped(from: &Path, renamed_to: &Path, cause: &str) -> Self {
        FileStampError::Filesystem {
            message: format!(
                "renamed '{}' to '{}', but timestamps were not updated: {}",
                from.display(),
                renamed_to.display(),
                cause
            ),
            renamed_to: Some(renamed_to.to_path_buf()),
        }
    }

    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            FileStampError::Validation(_) => 10,
            FileStampError::AlreadyExists(_) => 11,
            FileStampError::Filesystem { renamed_to: None, .. } => 20,
            FileStampError::Filesystem { renamed_to: Some(_), .. } => 21,
        }
    }

    /// Short machine-friendly kind name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FileStampError::Validation(_) => "validation",
            FileStampError::AlreadyExists(_) => "already_exists",
            FileStampError::Filesystem { renamed_to: None, .. } => "filesystem",
            FileStampError::Filesystem { renamed_to: Some(_), .. } => "partial_update",
        }
    }

    /// True when the entry was renamed even though the call failed.
    pub fn rename_committed(&self) -> bool {
        matches!(self, FileStampError::Filesystem { renamed_to: Some(_), .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_failure_message_mentions_both_halves() {
        let e = FileStampError::renamed_but_not_stamped(
            Path::new("/d/draft.txt"),
            Path::new("/d/final.txt"),
            "permission denied",
        );
        let msg = e.to_string();
        assert!(msg.contains("renamed '/d/draft.txt' to '/d/final.txt'"));
        assert!(msg.contains("timestamps were not updated"));
        assert!(e.rename_committed());
        assert_eq!(e.kind(), "partial_update");
    }

    #[test]
    fn codes_are_distinct() {
        let all = [
            FileStampError::Validation("x".into()),
            FileStampError::AlreadyExists("x".into()),
            FileStampError::filesystem("x"),
            FileStampError::renamed_but_not_stamped(Path::new("a"), Path::new("b"), "x"),
        ];
        let mut codes: Vec<u16> = all.iter().map(FileStampError::code).collect();
        codes.dedup();
        assert_eq!(codes.len(), 4);
    }
}
