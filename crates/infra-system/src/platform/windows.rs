// Windows native calls
// reason: windows crate for the loader, std for the CRT-style file calls

use std::borrow::Cow;
use std::ffi::{c_void, CStr};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::ptr::NonNull;
use std::time::UNIX_EPOCH;

use windows::core::{HSTRING, PCSTR};
use windows::Win32::Foundation::{FreeLibrary, HMODULE};
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};

use sysfacade_core::domain::ProcessExit;

/// Module handle returned by `LoadLibraryW`
pub(crate) struct RawLibrary(HMODULE);

// SAFETY: module handles are process-wide and the loader API is thread-safe
unsafe impl Send for RawLibrary {}
unsafe impl Sync for RawLibrary {}

impl RawLibrary {
    /// LoadLibraryW takes the name as given and applies its own `.dll` rule
    pub(crate) fn open(file_name: &CStr) -> Result<Self, String> {
        let wide = HSTRING::from(file_name.to_string_lossy().as_ref());
        // SAFETY: wide is a valid NUL-terminated UTF-16 string
        unsafe { LoadLibraryW(&wide) }
            .map(RawLibrary)
            .map_err(|e| e.to_string())
    }

    pub(crate) fn symbol(&self, name: &CStr) -> Option<NonNull<c_void>> {
        // SAFETY: self.0 is a live module handle, name is NUL-terminated
        let address = unsafe { GetProcAddress(self.0, PCSTR::from_raw(name.as_ptr().cast())) };
        address.and_then(|f| NonNull::new(f as *mut c_void))
    }

    pub(crate) fn close(self) -> Result<(), String> {
        // SAFETY: self is consumed, so FreeLibrary runs at most once per handle
        unsafe { FreeLibrary(self.0) }.map_err(|e| e.to_string())
    }
}

/// Last write time in milliseconds since the epoch
pub(crate) fn stat_mtime(path: &Path) -> Option<u64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let since_epoch = modified.duration_since(UNIX_EPOCH).ok()?;
    u64::try_from(since_epoch.as_millis()).ok()
}

pub(crate) fn change_dir(path: &Path) -> io::Result<()> {
    std::env::set_current_dir(path)
}

pub(crate) fn make_dir(path: &Path) -> io::Result<()> {
    std::fs::create_dir(path)
}

/// _fullpath: lexical, the path need not exist
pub(crate) fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

pub(crate) fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// FormatMessage text as rendered by std
pub(crate) fn os_message(err: &io::Error) -> String {
    err.to_string()
}

pub(crate) fn classify_exit(status: ExitStatus) -> ProcessExit {
    status.code().map_or(ProcessExit::Abnormal, ProcessExit::Code)
}
