//! I/O error description helpers.
//!
//! Turns a raw io::Error from a primitive into a message naming the operation,
//! the path and, where the OS code is recognised, a short hint.
//!
//! Usage:
//!   fs.move_path(from, to).map_err(io_error_with_help("rename", from))?;

use std::io;
use std::path::Path;

use crate::errors::FileStampError;

fn hint_for(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-device rename is not supported"),
            libc::EBUSY => Some("entry is busy; another process may be using it"),
            libc::ENOENT => Some("path not found; it may have been moved or deleted"),
            libc::EEXIST => Some("destination already exists"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("file name or path too long"),
            libc::ENOTSUP => Some("not supported by this filesystem"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            5 => Some("access denied; check permissions"),
            17 => Some("cross-device rename is not supported"),
            32 => Some("sharing violation; the file is open elsewhere"),
            2 | 3 => Some("path not found; it may have been moved or deleted"),
            80 | 183 => Some("destination already exists"),
            19 => Some("write-protected media"),
            206 => Some("file name or path too long"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        io::ErrorKind::AlreadyExists => Some("destination already exists"),
        io::ErrorKind::Unsupported => Some("not supported on this platform or filesystem"),
        _ => None,
    }
}

/// "<op> '<path>': <error>[ (<hint>)][ [os code: N]]"
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = hint_for(e) {
        msg.push_str(&format!(" ({hint})"));
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Closure for `.map_err(...)` that converts io::Error into a filesystem error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> FileStampError + 'a {
    move |e: io::Error| FileStampError::filesystem(describe_io_error(op, path, &e))
}
