//! Platform-specific helpers.
//! This module hides OS differences behind a uniform API so the rest of the
//! codebase can remain platform-agnostic. The interesting difference is
//! creation ("birth") time: macOS and Windows let us write it, other Unix
//! systems only let us read it (and not always that).

#[cfg(unix)]
mod common_unix;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(all(unix, not(target_os = "macos")))]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use common_unix::{open_log_file_secure_append, set_dir_mode_0700, write_config_secure_new_0600};

#[cfg(target_os = "macos")]
pub use macos::{creation_time_supported, set_creation_time};

#[cfg(all(unix, not(target_os = "macos")))]
pub use unix::{creation_time_supported, set_creation_time};

#[cfg(windows)]
pub use windows::{
    creation_time_supported, open_log_file_secure_append, set_creation_time, set_dir_mode_0700,
    write_config_secure_new_0600,
};

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &std::path::Path) -> std::io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() && std::fs::symlink_metadata(anc)?.file_type().is_symlink() {
            return Ok(true);
        }
        p = anc.parent();
    }
    Ok(false)
}
