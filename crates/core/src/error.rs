// Central Error Type for the facade

use thiserror::Error;

pub use crate::port::{AllocError, LinkError, LoaderError, PrimitiveError, SpawnError};

/// Umbrella error for callers that mix several facade components
#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    #[error("Primitive error: {0}")]
    Primitive(#[from] PrimitiveError),

    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    #[error("Spawn error: {0}")]
    Spawn(#[from] SpawnError),

    #[error("Allocation error: {0}")]
    Alloc(#[from] AllocError),
}

/// Result type alias using FacadeError
pub type Result<T> = std::result::Result<T, FacadeError>;
