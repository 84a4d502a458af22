//! File name validation.
//! Pure checks applied to a proposed base name before anything is renamed.
//! Rules run in a fixed order and the first failure wins.

use crate::errors::FileStampError;

/// Longest accepted name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Characters never allowed in a name.
pub const RESERVED_CHARS: [char; 9] = ['/', '\\', ':', '*', '"', '<', '>', '|', '\0'];

/// Device names reserved on Windows; rejected everywhere so names stay portable.
pub const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Outcome of a name check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub error_message: Option<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            error_message: None,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error_message: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<(), FileStampError> {
        if self.valid {
            Ok(())
        } else {
            Err(FileStampError::Validation(
                self.error_message
                    .unwrap_or_else(|| "invalid name".to_string()),
            ))
        }
    }
}

/// Validate a proposed name.
pub fn validate_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return ValidationResult::invalid("name must not be empty");
    }

    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return ValidationResult::invalid(format!(
            "name too long ({len} characters, max {MAX_NAME_LEN})"
        ));
    }

    if let Some(c) = trimmed.chars().find(|c| RESERVED_CHARS.contains(c)) {
        return ValidationResult::invalid(format!(
            "invalid character '{}' in name",
            c.escape_debug()
        ));
    }

    let stem = without_last_extension(trimmed).to_uppercase();
    if RESERVED_NAMES.contains(&stem.as_str()) {
        return ValidationResult::invalid(format!("'{stem}' is a reserved name"));
    }

    if trimmed == "." {
        return ValidationResult::invalid("name must not be '.'");
    }
    if trimmed == ".." {
        return ValidationResult::invalid("name must not be '..'");
    }

    if trimmed.ends_with(' ') {
        return ValidationResult::invalid("name must not end with a space");
    }

    ValidationResult::ok()
}

// A leading dot marks a hidden file, not an extension.
fn without_last_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
