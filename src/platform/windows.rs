//! Windows implementations of platform helpers.
//!
//! Notes:
//! - Creation time is written with SetFileTime on a handle opened for
//!   FILE_WRITE_ATTRIBUTES only, so the file contents are never opened for write.
//! - Windows lacks POSIX mode semantics; mode helpers are no-ops.

use anyhow::{bail, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::windows::fs::OpenOptionsExt;
use std::os::windows::io::AsRawHandle;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use windows_sys::Win32::Foundation::FILETIME;
use windows_sys::Win32::Storage::FileSystem::{
    FILE_FLAG_BACKUP_SEMANTICS, FILE_WRITE_ATTRIBUTES, SetFileTime,
};

/// Seconds between 1601-01-01 and 1970-01-01.
const EPOCH_DIFF_SECS: i128 = 11_644_473_600;

pub fn creation_time_supported() -> bool {
    true
}

pub fn set_creation_time(path: &Path, when: SystemTime) -> io::Result<()> {
    let file = OpenOptions::new()
        .access_mode(FILE_WRITE_ATTRIBUTES)
        .custom_flags(FILE_FLAG_BACKUP_SEMANTICS)
        .open(path)?;
    let ft = to_filetime(when);
    // SAFETY: the handle is owned by `file` for the duration of the call; null
    // access/write pointers leave those times unchanged.
    let ok = unsafe {
        SetFileTime(
            file.as_raw_handle() as _,
            &ft,
            std::ptr::null(),
            std::ptr::null(),
        )
    };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn to_filetime(when: SystemTime) -> FILETIME {
    let nanos_since_unix: i128 = match when.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as i128,
        Err(e) => -(e.duration().as_nanos() as i128),
    };
    let intervals = (EPOCH_DIFF_SECS * 1_000_000_000 + nanos_since_unix).max(0) / 100;
    let intervals = intervals as u64;
    FILETIME {
        dwLowDateTime: intervals as u32,
        dwHighDateTime: (intervals >> 32) as u32,
    }
}

/// Open log file for appending (no symlink defence available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// No-op; POSIX-style directory modes are not applicable.
pub fn set_dir_mode_0700(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Write a config file atomically via a temp sibling + rename.
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "config path has no parent"))?;
    fs::create_dir_all(parent)?;
    if path.is_dir() {
        bail!("config path '{}' is a directory", path.display());
    }
    let tmp = tmp_sibling_name(path);
    let mut f = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
    f.write_all(contents)?;
    f.sync_all()?;
    drop(f);
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn tmp_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let name = format!(".filestamp.config.tmp.{pid}.{nanos}");
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}
