//! Dynamic loader integration tests
//!
//! Loads real system libraries through `NativeLoader`.

use sysfacade_core::port::{DynamicLoader, LoadedLibrary, LoaderError};
use sysfacade_infra_system::NativeLoader;

/// A library every supported target ships with
#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn system_library(loader: &NativeLoader) -> Result<impl LoadedLibrary, LoaderError> {
    loader.open_file("libc.so.6")
}

#[cfg(target_os = "macos")]
fn system_library(loader: &NativeLoader) -> Result<impl LoadedLibrary, LoaderError> {
    // Suffix rule: /usr/lib/libSystem.B -> /usr/lib/libSystem.B.dylib
    loader.open("/usr/lib/libSystem.B")
}

#[cfg(windows)]
fn system_library(loader: &NativeLoader) -> Result<impl LoadedLibrary, LoaderError> {
    loader.open("kernel32")
}

#[cfg(any(all(target_os = "linux", target_env = "gnu"), target_os = "macos"))]
const KNOWN_SYMBOL: &str = "strlen";

#[cfg(windows)]
const KNOWN_SYMBOL: &str = "GetCurrentProcessId";

#[cfg(any(all(target_os = "linux", target_env = "gnu"), target_os = "macos", windows))]
mod with_system_library {
    use super::*;

    #[test]
    fn test_lookup_known_symbol() {
        let loader = NativeLoader::new();
        let lib = system_library(&loader).unwrap();

        let symbol = lib.lookup(KNOWN_SYMBOL).unwrap();
        assert!(!symbol.as_ptr().is_null());

        lib.close().unwrap();
    }

    #[test]
    fn test_lookup_missing_symbol() {
        let loader = NativeLoader::new();
        let lib = system_library(&loader).unwrap();

        let err = lib.lookup("sysfacade_nonexistent_symbol_xyz").unwrap_err();
        assert_eq!(
            err,
            LoaderError::SymbolNotFound {
                symbol: "sysfacade_nonexistent_symbol_xyz".to_string()
            }
        );
    }

    #[test]
    fn test_close_then_reopen() {
        let loader = NativeLoader::new();

        let lib = system_library(&loader).unwrap();
        lib.close().unwrap();

        let lib = system_library(&loader).unwrap();
        assert!(lib.lookup(KNOWN_SYMBOL).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_call_resolved_function() {
        use std::ffi::{c_char, CStr};

        let loader = NativeLoader::new();
        let lib = system_library(&loader).unwrap();
        let symbol = lib.lookup("strlen").unwrap();

        let strlen: unsafe extern "C" fn(*const c_char) -> usize = unsafe { symbol.cast() };
        let text: &CStr = c"facade";

        assert_eq!(unsafe { strlen(text.as_ptr()) }, 6);
    }
}

#[test]
fn test_open_missing_library() {
    let loader = NativeLoader::new();

    let err = loader.open("nonexistent-library-xyz").err().unwrap();
    match err {
        LoaderError::Open { file_name, reason } => {
            assert_eq!(file_name, loader.library_file_name("nonexistent-library-xyz"));
            assert!(!reason.is_empty());
        }
        other => panic!("unexpected error: {}", other),
    }
}

/// Libraries the test binary does not link against, with one of their exports
#[cfg(target_os = "linux")]
const UNLINKED_LIBRARIES: &[(&str, &str)] = &[
    ("libbz2.so.1.0", "BZ2_bzlibVersion"),
    ("libbz2.so.1", "BZ2_bzlibVersion"),
    ("libz.so.1", "zlibVersion"),
];

#[cfg(target_os = "linux")]
const LIBRARY_DIRS: &[&str] = &[
    "/lib/x86_64-linux-gnu",
    "/usr/lib/x86_64-linux-gnu",
    "/lib/aarch64-linux-gnu",
    "/usr/lib/aarch64-linux-gnu",
    "/lib64",
    "/usr/lib64",
    "/lib",
    "/usr/lib",
];

#[cfg(target_os = "linux")]
fn find_unlinked_library() -> Option<(std::path::PathBuf, &'static str)> {
    UNLINKED_LIBRARIES.iter().find_map(|(file, symbol)| {
        LIBRARY_DIRS
            .iter()
            .map(|dir| std::path::Path::new(dir).join(file))
            .find(|path| path.is_file())
            .map(|path| (path, *symbol))
    })
}

/// Bare name goes through the `.so` suffix rule, and RTLD_LOCAL keeps the
/// library's exports out of the process-wide namespace.
#[cfg(target_os = "linux")]
#[test]
fn test_open_by_bare_name_binds_locally() {
    use std::ffi::CString;

    let Some((real_path, symbol_name)) = find_unlinked_library() else {
        eprintln!("no unlinked system library found, skipping");
        return;
    };

    // "<dir>/libfixture.so" -> real library; opened as "<dir>/libfixture"
    let dir = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(&real_path, dir.path().join("libfixture.so")).unwrap();
    let bare_name = dir.path().join("libfixture");
    let bare_name = bare_name.to_str().unwrap();

    let loader = NativeLoader::new();
    let c_symbol = CString::new(symbol_name).unwrap();
    let global_lookup = || unsafe { libc::dlsym(libc::RTLD_DEFAULT, c_symbol.as_ptr()) };

    let lib = loader.open(bare_name).unwrap();
    assert!(lib.lookup(symbol_name).is_ok());
    assert!(global_lookup().is_null(), "{} leaked into the global namespace", symbol_name);
    lib.close().unwrap();

    let lib = loader.open(bare_name).unwrap();
    assert!(lib.lookup(symbol_name).is_ok());
    assert!(global_lookup().is_null());
}
