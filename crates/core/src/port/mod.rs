// Port Layer - One trait per OS facility

pub mod dynamic_loader;
pub mod file_time_probe;
pub mod system_primitives;

// Re-exports
pub use dynamic_loader::{DynamicLoader, LoadedLibrary, LoaderError, Symbol};
pub use file_time_probe::FileTimeProbe;
pub use system_primitives::{
    AllocError, LinkError, LinkFailure, PrimitiveError, SpawnError, SystemPrimitives,
};
