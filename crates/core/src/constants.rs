// Facade constants (No magic values)

/// Legacy integer status reported when a process could not be started at all.
/// Never collides with a real exit code, which is always in 0..=255 on POSIX.
pub const SPAWN_FAILED_STATUS: i32 = -1;

/// Exit code reported for a process killed by a signal or an exception.
/// Signal/exception detail is not available on every platform, so it is collapsed.
pub const ABNORMAL_EXIT_CODE: i32 = 1;

/// Permission bits requested for new directories on POSIX (before umask)
pub const POSIX_DIR_MODE: u32 = 0o777;

/// Nanoseconds per second, used to flatten `st_mtim` into one u64
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Shared library suffix on the default POSIX branch
pub const UNIX_LIBRARY_SUFFIX: &str = ".so";

/// Shared library suffix on Apple targets
pub const APPLE_LIBRARY_SUFFIX: &str = ".dylib";

/// Windows: `LoadLibraryW` appends `.dll` itself, so the facade appends nothing
pub const WINDOWS_LIBRARY_SUFFIX: &str = "";
