//! Build-time selection of the native call layer.
//!
//! Each branch exposes the same crate-private surface: `RawLibrary`,
//! `stat_mtime`, `change_dir`, `make_dir`, `absolute_path`, `path_bytes`,
//! `os_message` and `classify_exit`. The Apple branch shares the unix code;
//! only the library suffix differs, and that lives in `PlatformFamily`.

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub(crate) use unix::*;

#[cfg(windows)]
pub(crate) use windows::*;
