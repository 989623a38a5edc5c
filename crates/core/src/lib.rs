// sysfacade Core - Ports & value types
// NO platform dependencies: adapters live in sysfacade-infra-system

pub mod constants;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{FacadeError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
