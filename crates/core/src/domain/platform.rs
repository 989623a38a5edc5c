// Build-time platform description

use serde::{Deserialize, Serialize};

use crate::constants::{APPLE_LIBRARY_SUFFIX, UNIX_LIBRARY_SUFFIX, WINDOWS_LIBRARY_SUFFIX};

/// OS family the facade was compiled for.
///
/// Selected with `cfg!` at build time; there is no runtime detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    /// Default POSIX branch (Linux, the BSDs, ...)
    Unix,
    /// macOS, iOS and friends
    Apple,
    Windows,
}

/// Granularity of the values returned by a `FileTimeProbe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MtimePrecision {
    Milliseconds,
    Nanoseconds,
}

impl PlatformFamily {
    /// The family of the current build target
    pub const fn current() -> Self {
        if cfg!(windows) {
            PlatformFamily::Windows
        } else if cfg!(target_vendor = "apple") {
            PlatformFamily::Apple
        } else {
            PlatformFamily::Unix
        }
    }

    /// Suffix appended to a bare library name before loading
    pub const fn library_suffix(self) -> &'static str {
        match self {
            PlatformFamily::Unix => UNIX_LIBRARY_SUFFIX,
            PlatformFamily::Apple => APPLE_LIBRARY_SUFFIX,
            PlatformFamily::Windows => WINDOWS_LIBRARY_SUFFIX,
        }
    }

    pub const fn mtime_precision(self) -> MtimePrecision {
        match self {
            PlatformFamily::Windows => MtimePrecision::Milliseconds,
            PlatformFamily::Unix | PlatformFamily::Apple => MtimePrecision::Nanoseconds,
        }
    }

    /// Map a library name without extension to the file name handed to the loader
    ///
    /// # Example
    /// ```
    /// use sysfacade_core::domain::PlatformFamily;
    ///
    /// assert_eq!(PlatformFamily::Unix.library_file_name("mylib"), "mylib.so");
    /// assert_eq!(PlatformFamily::Apple.library_file_name("mylib"), "mylib.dylib");
    /// assert_eq!(PlatformFamily::Windows.library_file_name("mylib"), "mylib");
    /// ```
    pub fn library_file_name(self, name: &str) -> String {
        format!("{}{}", name, self.library_suffix())
    }
}
