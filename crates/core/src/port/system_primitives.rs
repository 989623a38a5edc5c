// System Primitives Port
// One signature per process/filesystem/environment call, whatever the host

use std::ffi::{CStr, CString, OsString};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::SPAWN_FAILED_STATUS;
use crate::domain::{CalendarTime, ProcessExit};

/// Errors from filesystem and environment primitives
#[derive(Error, Debug)]
pub enum PrimitiveError {
    #[error("{op} failed: {source}")]
    Os {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Invalid fopen mode: {0:?}")]
    InvalidMode(String),

    #[error("Buffer too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
}

impl PrimitiveError {
    pub fn os(op: &'static str, source: io::Error) -> Self {
        PrimitiveError::Os { op, source }
    }

    /// Underlying OS error kind, if any
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            PrimitiveError::Os { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Why a hard link could not be created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFailure {
    AlreadyExists,
    SourceMissing,
    PermissionDenied,
    Other,
}

impl LinkFailure {
    pub fn from_io_kind(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::AlreadyExists => LinkFailure::AlreadyExists,
            io::ErrorKind::NotFound => LinkFailure::SourceMissing,
            io::ErrorKind::PermissionDenied => LinkFailure::PermissionDenied,
            _ => LinkFailure::Other,
        }
    }
}

/// Hard link failure: the OS-supplied message plus a coarse classification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LinkError {
    pub kind: LinkFailure,
    pub message: String,
}

/// Spawn errors
///
/// Only covers processes that never ran; a started process always yields a
/// `ProcessExit`, even when it failed.
#[derive(Error, Debug)]
pub enum SpawnError {
    #[error("Could not start {command}: {source}")]
    NotStarted {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Allocation failure while duplicating a string
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Failed to allocate {len} bytes")]
pub struct AllocError {
    pub len: usize,
}

/// System primitives trait
///
/// Implementations:
/// - SystemPrimitivesImpl: POSIX calls on unix, CRT/Win32 equivalents on Windows
///
/// All calls are synchronous and stateless. The working directory and the
/// environment are process-wide; callers mutating them from several threads
/// must serialize those calls themselves.
pub trait SystemPrimitives: Send + Sync {
    /// Change the process working directory
    fn chdir(&self, path: &Path) -> Result<(), PrimitiveError>;

    /// Copy of an environment variable, `None` if it is unset
    fn dupenv(&self, name: &str) -> Option<OsString>;

    /// Open a file with a C `fopen` mode string (`"r"`, `"w+b"`, ...)
    ///
    /// # Errors
    /// - PrimitiveError::InvalidMode if the mode string is not understood
    /// - PrimitiveError::Os if the file cannot be opened
    fn fopen(&self, path: &Path, mode: &str) -> Result<File, PrimitiveError>;

    /// Absolute form of `path`
    ///
    /// POSIX resolves symlinks and requires the path to exist (`realpath`);
    /// Windows resolves lexically (`_fullpath`).
    fn fullpath(&self, path: &Path) -> Result<PathBuf, PrimitiveError>;

    /// Write the NUL-terminated absolute path into `dst`
    ///
    /// # Returns
    /// Length of the path in bytes, without the terminator
    ///
    /// # Errors
    /// - PrimitiveError::BufferTooSmall if `dst` cannot hold path and terminator
    fn fullpath_into(&self, path: &Path, dst: &mut [u8]) -> Result<usize, PrimitiveError>;

    /// Convert seconds since the epoch to UTC calendar fields
    fn gmtime(&self, secs: i64) -> Option<CalendarTime>;

    /// Create a hard link `dst` pointing at the file `src`
    fn link(&self, src: &Path, dst: &Path) -> Result<(), LinkError>;

    /// Create a directory (fails if it already exists)
    fn mkdir(&self, path: &Path) -> Result<(), PrimitiveError>;

    /// Set an environment variable, overwriting any previous value.
    /// Best effort: invalid names are ignored.
    fn setenv(&self, name: &str, value: &str);

    /// Run `command` (looked up in PATH) with `args` and block until it exits
    ///
    /// `args` excludes the program name. Stdio and environment are inherited.
    /// No timeout: a hung child blocks the caller indefinitely.
    ///
    /// # Errors
    /// - SpawnError::NotStarted if the process could not be created
    fn spawn(&self, command: &str, args: &[&str]) -> Result<ProcessExit, SpawnError>;

    /// Duplicate a C string into a fresh caller-owned allocation
    fn strdup(&self, src: &CStr) -> Result<CString, AllocError>;

    /// `spawn` flattened to one integer: the exit code, `ABNORMAL_EXIT_CODE`
    /// for abnormal termination, `SPAWN_FAILED_STATUS` if it never started
    fn spawn_status(&self, command: &str, args: &[&str]) -> i32 {
        match self.spawn(command, args) {
            Ok(exit) => exit.code(),
            Err(_) => SPAWN_FAILED_STATUS,
        }
    }

    /// `link` flattened to the message-or-nothing form
    fn link_message(&self, src: &Path, dst: &Path) -> Option<String> {
        self.link(src, dst).err().map(|e| e.message)
    }
}
