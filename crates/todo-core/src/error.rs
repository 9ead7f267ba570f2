use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Index out of bounds: {index} (view has {len} items)")]
    InvalidIndex { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

