use thiserror::Error;

/// Errors surfaced by the record store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness invariant (external id, or the
    /// name/author/year/pages tuple) rejected a write.
    #[error("record violates a uniqueness constraint")]
    Duplicate,

    /// An update matched zero records.
    #[error("no record found with id {id}")]
    NotFound { id: String },

    /// More than one stored record matches a seed record — the uniqueness
    /// invariant is already broken and the process must not keep running.
    #[error("multiple records match seed record {id}")]
    Integrity { id: String },

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

impl StoreError {
    /// Classify a driver error, pulling duplicate-key rejections out into
    /// [`StoreError::Duplicate`].
    pub fn from_driver(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            StoreError::Duplicate
        } else {
            StoreError::Driver(err)
        }
    }
}

// Server-side duplicate-key writes come back as code 11000.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}
