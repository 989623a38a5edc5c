// System primitives implementation
// reason: platform module where POSIX and Windows differ, std where they agree

use std::ffi::{CStr, CString, OsString};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, trace};

use sysfacade_core::domain::{CalendarTime, FileMode, ProcessExit};
use sysfacade_core::port::system_primitives::{
    AllocError, LinkError, LinkFailure, PrimitiveError, SpawnError, SystemPrimitives,
};

use crate::platform;

/// `SystemPrimitives` for the build target
///
/// Stateless; every method is one blocking call into the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPrimitivesImpl;

impl SystemPrimitivesImpl {
    pub fn new() -> Self {
        Self
    }
}

// std::env::set_var panics on these
fn is_valid_env_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}

impl SystemPrimitives for SystemPrimitivesImpl {
    fn chdir(&self, path: &Path) -> Result<(), PrimitiveError> {
        platform::change_dir(path).map_err(|e| PrimitiveError::os("chdir", e))?;

        debug!(path = %path.display(), "Working directory changed");
        Ok(())
    }

    fn dupenv(&self, name: &str) -> Option<OsString> {
        if !is_valid_env_name(name) {
            return None;
        }
        std::env::var_os(name)
    }

    fn fopen(&self, path: &Path, mode: &str) -> Result<File, PrimitiveError> {
        let file_mode =
            FileMode::parse(mode).ok_or_else(|| PrimitiveError::InvalidMode(mode.to_string()))?;

        trace!(path = %path.display(), mode = %mode, "Opening file");
        file_mode
            .to_open_options()
            .open(path)
            .map_err(|e| PrimitiveError::os("fopen", e))
    }

    fn fullpath(&self, path: &Path) -> Result<PathBuf, PrimitiveError> {
        platform::absolute_path(path).map_err(|e| PrimitiveError::os("fullpath", e))
    }

    fn fullpath_into(&self, path: &Path, dst: &mut [u8]) -> Result<usize, PrimitiveError> {
        let full = self.fullpath(path)?;
        let bytes = platform::path_bytes(&full);

        let needed = bytes.len() + 1;
        if needed > dst.len() {
            return Err(PrimitiveError::BufferTooSmall {
                needed,
                capacity: dst.len(),
            });
        }

        dst[..bytes.len()].copy_from_slice(&bytes);
        dst[bytes.len()] = 0;
        Ok(bytes.len())
    }

    fn gmtime(&self, secs: i64) -> Option<CalendarTime> {
        CalendarTime::from_unix_seconds(secs)
    }

    fn link(&self, src: &Path, dst: &Path) -> Result<(), LinkError> {
        std::fs::hard_link(src, dst).map_err(|e| {
            let err = LinkError {
                kind: LinkFailure::from_io_kind(e.kind()),
                message: platform::os_message(&e),
            };
            debug!(
                src = %src.display(),
                dst = %dst.display(),
                kind = ?err.kind,
                "Hard link failed"
            );
            err
        })
    }

    fn mkdir(&self, path: &Path) -> Result<(), PrimitiveError> {
        platform::make_dir(path).map_err(|e| PrimitiveError::os("mkdir", e))
    }

    fn setenv(&self, name: &str, value: &str) {
        if !is_valid_env_name(name) || value.contains('\0') {
            trace!(name = %name, "Ignoring invalid environment assignment");
            return;
        }
        std::env::set_var(name, value);
    }

    fn spawn(&self, command: &str, args: &[&str]) -> Result<ProcessExit, SpawnError> {
        debug!(command = %command, args = ?args, "Spawning process");

        let status = Command::new(command)
            .args(args)
            .status()
            .map_err(|source| {
                debug!(command = %command, error = %source, "Process could not be started");
                SpawnError::NotStarted {
                    command: command.to_string(),
                    source,
                }
            })?;

        let exit = platform::classify_exit(status);
        debug!(command = %command, exit = ?exit, "Process finished");

        Ok(exit)
    }

    fn strdup(&self, src: &CStr) -> Result<CString, AllocError> {
        let bytes = src.to_bytes_with_nul();

        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes.len())
            .map_err(|_| AllocError { len: bytes.len() })?;
        buf.extend_from_slice(bytes);

        // SAFETY: copied from a CStr, so the only NUL is the trailing one
        Ok(unsafe { CString::from_vec_with_nul_unchecked(buf) })
    }
}
