// File time probe implementation
// reason: nix stat on unix, std metadata on Windows

use std::path::Path;
use tracing::trace;

use sysfacade_core::domain::Timestamp;
use sysfacade_core::port::FileTimeProbe;

use crate::platform;

/// `FileTimeProbe` backed by the platform's default stat call
///
/// Nanosecond readings on unix, millisecond readings on Windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTimeProbeImpl;

impl FileTimeProbeImpl {
    pub fn new() -> Self {
        Self
    }
}

impl FileTimeProbe for FileTimeProbeImpl {
    fn mtime(&self, path: &Path) -> Option<Timestamp> {
        let reading = platform::stat_mtime(path).and_then(Timestamp::new);

        trace!(path = %path.display(), mtime = ?reading, "File mtime probed");

        reading
    }
}
