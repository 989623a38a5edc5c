// POSIX native calls (default branch and Apple)
// reason: libc for dlfcn, nix for stat/chdir/mkdir/errno

use std::borrow::Cow;
use std::ffi::{c_void, CStr};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::ptr::NonNull;

use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::stat::{stat, Mode};
use tracing::debug;

use sysfacade_core::constants::{NANOS_PER_SEC, POSIX_DIR_MODE};
use sysfacade_core::domain::ProcessExit;

/// Handle returned by `dlopen`
pub(crate) struct RawLibrary(NonNull<c_void>);

// SAFETY: dlopen handles are process-wide and dlsym/dlclose are thread-safe
unsafe impl Send for RawLibrary {}
unsafe impl Sync for RawLibrary {}

impl RawLibrary {
    /// RTLD_NOW | RTLD_LOCAL: resolve at load time, keep exports out of the
    /// global namespace
    pub(crate) fn open(file_name: &CStr) -> Result<Self, String> {
        // SAFETY: file_name is NUL-terminated
        let handle = unsafe { libc::dlopen(file_name.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        NonNull::new(handle).map(RawLibrary).ok_or_else(last_dl_error)
    }

    pub(crate) fn symbol(&self, name: &CStr) -> Option<NonNull<c_void>> {
        // SAFETY: self.0 is a live dlopen handle, name is NUL-terminated
        NonNull::new(unsafe { libc::dlsym(self.0.as_ptr(), name.as_ptr()) })
    }

    pub(crate) fn close(self) -> Result<(), String> {
        // SAFETY: self is consumed, so dlclose runs at most once per handle
        match unsafe { libc::dlclose(self.0.as_ptr()) } {
            0 => Ok(()),
            _ => Err(last_dl_error()),
        }
    }
}

fn last_dl_error() -> String {
    // SAFETY: dlerror returns null or a thread-local NUL-terminated string
    let msg = unsafe { libc::dlerror() };
    if msg.is_null() {
        return "unknown dynamic loader error".to_string();
    }
    // SAFETY: non-null, copied before any other dl* call on this thread
    unsafe { CStr::from_ptr(msg) }
        .to_string_lossy()
        .into_owned()
}

/// `st_mtim` flattened to nanoseconds since the epoch
pub(crate) fn stat_mtime(path: &Path) -> Option<u64> {
    let st = stat(path).ok()?;

    // Pre-epoch times have no unsigned encoding
    let secs = u64::try_from(st.st_mtime).ok()?;
    let nanos = u64::try_from(st.st_mtime_nsec).ok()?;

    secs.checked_mul(NANOS_PER_SEC)?.checked_add(nanos)
}

pub(crate) fn change_dir(path: &Path) -> io::Result<()> {
    nix::unistd::chdir(path).map_err(io::Error::from)
}

pub(crate) fn make_dir(path: &Path) -> io::Result<()> {
    let mode = Mode::from_bits_truncate(POSIX_DIR_MODE as libc::mode_t);
    nix::unistd::mkdir(path, mode).map_err(io::Error::from)
}

/// realpath(3): resolves symlinks, the path must exist
pub(crate) fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    std::fs::canonicalize(path)
}

pub(crate) fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    Cow::Borrowed(path.as_os_str().as_bytes())
}

/// strerror(3) text, without Rust's "(os error N)" suffix
pub(crate) fn os_message(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => Errno::from_raw(code).desc().to_string(),
        None => err.to_string(),
    }
}

pub(crate) fn classify_exit(status: ExitStatus) -> ProcessExit {
    if let Some(code) = status.code() {
        return ProcessExit::Code(code);
    }

    let signal = status.signal().map(Signal::try_from);
    debug!(signal = ?signal, "Process terminated by signal");
    ProcessExit::Abnormal
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_os_message_is_strerror() {
        let err = io::Error::from_raw_os_error(libc::EEXIST);
        assert_eq!(os_message(&err), "File exists");
    }

    #[test]
    fn test_open_missing_reports_dlerror() {
        let name = CString::new("sysfacade-no-such-library.so").unwrap();
        let reason = RawLibrary::open(&name).err().unwrap();

        assert!(reason.contains("sysfacade-no-such-library.so"), "{}", reason);
    }

    #[test]
    fn test_stat_mtime_missing() {
        assert!(stat_mtime(Path::new("/definitely/not/here")).is_none());
    }
}
