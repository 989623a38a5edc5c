// File time probe port

use std::path::Path;

use crate::domain::Timestamp;

/// Last-modification time lookup
///
/// Every call queries the filesystem; nothing is cached. Symbolic links are
/// followed the way the platform's default `stat` follows them.
pub trait FileTimeProbe: Send + Sync {
    /// Modification time of `path`, or `None` if it cannot be determined
    /// (missing file, permission denied, I/O error)
    ///
    /// Nanoseconds since the epoch on POSIX and Apple, milliseconds on Windows.
    /// Only compare readings taken on the same host.
    fn mtime(&self, path: &Path) -> Option<Timestamp>;

    /// Same as `mtime`, with 0 standing for "could not be determined"
    fn mtime_raw(&self, path: &Path) -> u64 {
        Timestamp::raw_or_zero(self.mtime(path))
    }

    /// Check whether `path` was modified after a previously recorded reading
    ///
    /// # Example
    /// ```text
    /// let seen = probe.mtime(path);
    /// // ... later
    /// if seen.map_or(true, |t| probe.is_newer_than(path, t)) {
    ///     reload(path);
    /// }
    /// ```
    fn is_newer_than(&self, path: &Path, previous: Timestamp) -> bool {
        self.mtime(path).is_some_and(|now| now > previous)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Mock FileTimeProbe backed by a path -> raw reading table
    #[derive(Default)]
    pub struct MockFileTimeProbe {
        readings: Arc<Mutex<HashMap<PathBuf, u64>>>,
    }

    impl MockFileTimeProbe {
        pub fn new() -> Self {
            Self::default()
        }

        /// Record a raw reading; 0 behaves like a failed stat
        pub fn set_mtime(&self, path: impl Into<PathBuf>, raw: u64) {
            self.readings.lock().unwrap().insert(path.into(), raw);
        }

        pub fn remove(&self, path: &Path) {
            self.readings.lock().unwrap().remove(path);
        }
    }

    impl FileTimeProbe for MockFileTimeProbe {
        fn mtime(&self, path: &Path) -> Option<Timestamp> {
            let raw = self.readings.lock().unwrap().get(path).copied()?;
            Timestamp::new(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::MockFileTimeProbe;
    use super::*;

    #[test]
    fn test_missing_reads_as_zero() {
        let probe = MockFileTimeProbe::new();
        let path = Path::new("missing.txt");

        assert!(probe.mtime(path).is_none());
        assert_eq!(probe.mtime_raw(path), 0);
    }

    #[test]
    fn test_zero_reading_is_unknown() {
        let probe = MockFileTimeProbe::new();
        probe.set_mtime("broken.txt", 0);

        assert!(probe.mtime(Path::new("broken.txt")).is_none());
    }

    #[test]
    fn test_is_newer_than() {
        let probe: Box<dyn FileTimeProbe> = {
            let mock = MockFileTimeProbe::new();
            mock.set_mtime("a.txt", 100);
            Box::new(mock)
        };
        let path = Path::new("a.txt");
        let seen = probe.mtime(path).unwrap();

        assert!(!probe.is_newer_than(path, seen));
        assert!(probe.is_newer_than(path, Timestamp::new(99).unwrap()));
    }

    #[test]
    fn test_removed_file_is_never_newer() {
        let probe = MockFileTimeProbe::new();
        probe.set_mtime("gone.txt", 500);
        let seen = probe.mtime(Path::new("gone.txt")).unwrap();

        probe.remove(Path::new("gone.txt"));

        assert!(!probe.is_newer_than(Path::new("gone.txt"), seen));
        assert_eq!(probe.mtime_raw(Path::new("gone.txt")), 0);
    }
}
