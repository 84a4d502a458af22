//! Unix (non-macOS) creation-time support.
//! Linux and the BSDs expose birth time read-only (statx / st_birthtime), so
//! writing it is reported as unsupported and the caller decides what to do.

use std::io;
use std::path::Path;
use std::time::SystemTime;

pub fn creation_time_supported() -> bool {
    false
}

pub fn set_creation_time(path: &Path, _when: SystemTime) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!(
            "creation time of '{}' cannot be changed on this platform",
            path.display()
        ),
    ))
}
