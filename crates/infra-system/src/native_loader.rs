// Native dynamic loader
// dlopen/dlsym/dlclose on unix, LoadLibraryW/GetProcAddress/FreeLibrary on Windows

use std::ffi::CString;
use tracing::{debug, trace};

use sysfacade_core::port::dynamic_loader::{DynamicLoader, LoadedLibrary, LoaderError, Symbol};

use crate::platform::RawLibrary;

/// Loader for the build target's native library format
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLoader;

impl NativeLoader {
    pub fn new() -> Self {
        Self
    }
}

/// Library loaded by `NativeLoader`
///
/// Released on `close` or on drop, whichever comes first.
pub struct NativeLibrary {
    // Option only so that close/Drop can take the handle; Some until then
    raw: Option<RawLibrary>,
    file_name: String,
}

impl NativeLibrary {
    /// File name the library was opened with
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

fn c_name(name: &str) -> Result<CString, LoaderError> {
    CString::new(name).map_err(|_| LoaderError::InvalidName(name.to_string()))
}

impl DynamicLoader for NativeLoader {
    type Library = NativeLibrary;

    fn open_file(&self, file_name: &str) -> Result<NativeLibrary, LoaderError> {
        let c_file_name = c_name(file_name)?;

        let raw = RawLibrary::open(&c_file_name).map_err(|reason| {
            debug!(library = %file_name, reason = %reason, "Dynamic library load failed");
            LoaderError::Open {
                file_name: file_name.to_string(),
                reason,
            }
        })?;

        debug!(library = %file_name, "Dynamic library loaded");
        Ok(NativeLibrary {
            raw: Some(raw),
            file_name: file_name.to_string(),
        })
    }
}

impl LoadedLibrary for NativeLibrary {
    fn lookup(&self, symbol: &str) -> Result<Symbol<'_>, LoaderError> {
        let not_found = || LoaderError::SymbolNotFound {
            symbol: symbol.to_string(),
        };

        let c_symbol = c_name(symbol)?;
        let addr = self
            .raw
            .as_ref()
            .and_then(|raw| raw.symbol(&c_symbol))
            .ok_or_else(not_found)?;

        trace!(library = %self.file_name, symbol = %symbol, addr = ?addr, "Symbol resolved");
        Ok(Symbol::from_library(self, addr))
    }

    fn close(mut self) -> Result<(), LoaderError> {
        match self.raw.take() {
            Some(raw) => {
                debug!(library = %self.file_name, "Closing dynamic library");
                raw.close().map_err(LoaderError::Close)
            }
            // Unreachable: raw is Some until close or Drop takes it
            None => Ok(()),
        }
    }
}

impl Drop for NativeLibrary {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            if let Err(reason) = raw.close() {
                debug!(
                    library = %self.file_name,
                    reason = %reason,
                    "Implicit library close failed"
                );
            }
        }
    }
}
