// Domain Layer - Platform-neutral value types

pub mod calendar;
pub mod file_mode;
pub mod platform;
pub mod process;
pub mod timestamp;

// Re-exports
pub use calendar::CalendarTime;
pub use file_mode::FileMode;
pub use platform::{MtimePrecision, PlatformFamily};
pub use process::ProcessExit;
pub use timestamp::Timestamp;
