use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Person not found: id {0}")]
    NotFound(u32),

    #[error("Invalid birth date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Unknown parent id {parent} referenced by record {child}")]
    UnknownParent { child: u32, parent: u32 },

    #[error("Unknown traversal order: {0}")]
    UnknownOrder(String),

    #[error("Internal store operation failed: {0}")]
    InternalError(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
