// sysfacade Infrastructure - Native adapters
// Implements: DynamicLoader, FileTimeProbe, SystemPrimitives

mod platform;

pub mod file_time_probe_impl;
pub mod native_loader;
pub mod system_primitives_impl;

pub use file_time_probe_impl::FileTimeProbeImpl;
pub use native_loader::{NativeLibrary, NativeLoader};
pub use system_primitives_impl::SystemPrimitivesImpl;
