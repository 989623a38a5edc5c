// Dynamic Loader Port
// Open a shared library by bare name, resolve symbols, close it

use std::ffi::c_void;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use thiserror::Error;

use crate::domain::PlatformFamily;

/// Dynamic loader errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoaderError {
    #[error("Invalid library or symbol name: {0:?}")]
    InvalidName(String),

    #[error("Failed to load {file_name}: {reason}")]
    Open { file_name: String, reason: String },

    #[error("Symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("Failed to close library: {0}")]
    Close(String),
}

/// Raw entry point resolved from a loaded library.
///
/// Borrows the library it came from, so it cannot outlive the handle.
/// The signature behind the address is neither known nor checked.
///
/// ```compile_fail
/// use sysfacade_core::port::dynamic_loader::mocks::MockDynamicLoader;
/// use sysfacade_core::port::{DynamicLoader, LoadedLibrary};
///
/// let loader = MockDynamicLoader::new().with_library("plugin.so", &[("hello", 0x10)]);
/// let symbol = {
///     let lib = loader.open_file("plugin.so").unwrap();
///     lib.lookup("hello").unwrap()
/// };
/// println!("{:?}", symbol);
/// ```
#[derive(Clone, Copy)]
pub struct Symbol<'lib> {
    addr: NonNull<c_void>,
    _library: PhantomData<&'lib ()>,
}

impl<'lib> Symbol<'lib> {
    /// Wrap an address resolved from `library`; the symbol borrows it
    pub fn from_library<L>(_library: &'lib L, addr: NonNull<c_void>) -> Self
    where
        L: LoadedLibrary + ?Sized,
    {
        Self {
            addr,
            _library: PhantomData,
        }
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.addr.as_ptr()
    }

    /// Reinterpret the address as a pointer-sized value, typically an
    /// `extern "C" fn` type.
    ///
    /// # Safety
    /// `T` must match the real type of the exported item, and any copy of the
    /// returned value must not be used after the library is closed.
    ///
    /// # Panics
    /// If `T` is not pointer-sized.
    pub unsafe fn cast<T: Copy>(&self) -> T {
        assert_eq!(
            mem::size_of::<T>(),
            mem::size_of::<*mut c_void>(),
            "symbol can only be cast to a pointer-sized type"
        );
        // SAFETY: sizes checked above, type correctness is on the caller
        unsafe { mem::transmute_copy(&self.addr) }
    }
}

impl fmt::Debug for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Symbol").field(&self.addr).finish()
    }
}

/// An open library, exclusively owned by the caller.
///
/// Dropping the handle releases the library; `close` does the same but
/// reports loader errors. Both invalidate every `Symbol` taken from it.
pub trait LoadedLibrary {
    /// Resolve an exported symbol by exact name
    ///
    /// # Errors
    /// - LoaderError::SymbolNotFound if the library does not export it
    /// - LoaderError::InvalidName if the name contains a NUL byte
    fn lookup(&self, symbol: &str) -> Result<Symbol<'_>, LoaderError>;

    /// Release the library
    fn close(self) -> Result<(), LoaderError>
    where
        Self: Sized;
}

/// Dynamic loader trait
///
/// Implementations:
/// - NativeLoader: dlopen (RTLD_NOW | RTLD_LOCAL) or LoadLibraryW
pub trait DynamicLoader: Send + Sync {
    type Library: LoadedLibrary;

    /// Load a library given its name without extension
    ///
    /// # Example
    /// ```text
    /// let lib = loader.open("mylib")?;      // mylib.so / mylib.dylib / mylib.dll
    /// let hello = lib.lookup("hello")?;
    /// lib.close()?;
    /// ```
    fn open(&self, name: &str) -> Result<Self::Library, LoaderError> {
        self.open_file(&self.library_file_name(name))
    }

    /// Load a library by its exact file name, no suffix added
    fn open_file(&self, file_name: &str) -> Result<Self::Library, LoaderError>;

    /// File name that `open` hands to the platform loader
    fn library_file_name(&self, name: &str) -> String {
        PlatformFamily::current().library_file_name(name)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory loader: each registered library exports a fixed symbol table
    #[derive(Default)]
    pub struct MockDynamicLoader {
        libraries: HashMap<String, HashMap<String, usize>>,
        open_count: Arc<Mutex<usize>>,
    }

    impl MockDynamicLoader {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a library under its full file name
        pub fn with_library(mut self, file_name: &str, symbols: &[(&str, usize)]) -> Self {
            let table = symbols
                .iter()
                .map(|(name, addr)| (name.to_string(), *addr))
                .collect();
            self.libraries.insert(file_name.to_string(), table);
            self
        }

        /// Libraries currently open
        pub fn open_count(&self) -> usize {
            *self.open_count.lock().unwrap()
        }
    }

    pub struct MockLibrary {
        symbols: HashMap<String, usize>,
        open_count: Arc<Mutex<usize>>,
    }

    impl Drop for MockLibrary {
        fn drop(&mut self) {
            *self.open_count.lock().unwrap() -= 1;
        }
    }

    impl LoadedLibrary for MockLibrary {
        fn lookup(&self, symbol: &str) -> Result<Symbol<'_>, LoaderError> {
            self.symbols
                .get(symbol)
                .and_then(|addr| NonNull::new(*addr as *mut c_void))
                .map(|addr| Symbol::from_library(self, addr))
                .ok_or_else(|| LoaderError::SymbolNotFound {
                    symbol: symbol.to_string(),
                })
        }

        fn close(self) -> Result<(), LoaderError> {
            Ok(())
        }
    }

    impl DynamicLoader for MockDynamicLoader {
        type Library = MockLibrary;

        fn open_file(&self, file_name: &str) -> Result<MockLibrary, LoaderError> {
            let symbols =
                self.libraries
                    .get(file_name)
                    .cloned()
                    .ok_or_else(|| LoaderError::Open {
                        file_name: file_name.to_string(),
                        reason: "not registered".to_string(),
                    })?;

            *self.open_count.lock().unwrap() += 1;
            Ok(MockLibrary {
                symbols,
                open_count: self.open_count.clone(),
            })
        }
    }
}
