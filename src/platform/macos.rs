//! macOS creation-time support via setattrlist(2) with ATTR_CMN_CRTIME.

use std::ffi::CString;
use std::io;
use std::mem;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn creation_time_supported() -> bool {
    true
}

pub fn set_creation_time(path: &Path, when: SystemTime) -> io::Result<()> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))?;

    let (secs, nanos) = split_epoch(when);
    let mut ts = libc::timespec {
        tv_sec: secs as libc::time_t,
        tv_nsec: nanos as libc::c_long,
    };

    // SAFETY: attrlist is a plain C struct; all-zero is a valid empty request.
    let mut attrs: libc::attrlist = unsafe { mem::zeroed() };
    attrs.bitmapcount = libc::ATTR_BIT_MAP_COUNT;
    attrs.commonattr = libc::ATTR_CMN_CRTIME;

    // SAFETY: c_path is NUL-terminated, attrs and ts outlive the call and the
    // buffer size matches the single timespec requested by ATTR_CMN_CRTIME.
    let rc = unsafe {
        libc::setattrlist(
            c_path.as_ptr(),
            &mut attrs as *mut libc::attrlist as *mut libc::c_void,
            &mut ts as *mut libc::timespec as *mut libc::c_void,
            mem::size_of::<libc::timespec>(),
            0,
        )
    };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

// (seconds, nanoseconds) relative to the Unix epoch, nanoseconds always >= 0.
fn split_epoch(when: SystemTime) -> (i64, i64) {
    match when.duration_since(UNIX_EPOCH) {
        Ok(d) => (d.as_secs() as i64, d.subsec_nanos() as i64),
        Err(e) => {
            let d = e.duration();
            let (s, n) = (d.as_secs() as i64, d.subsec_nanos() as i64);
            if n == 0 { (-s, 0) } else { (-s - 1, 1_000_000_000 - n) }
        }
    }
}
