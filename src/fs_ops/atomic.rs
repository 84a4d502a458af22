//! Atomic rename helper.
//! - Refuses to replace an existing destination (rename would clobber it on Unix).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

pub(super) fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    // Narrows, but cannot close, the window between the caller's existence
    // check and the rename.
    if fs::symlink_metadata(dst).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("destination '{}' already exists", dst.display()),
        ));
    }

    fs::rename(src, dst)?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // A failed fsync must not turn a committed rename into an error.
        let _ = fsync_dir(parent);
    }

    Ok(())
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}
