use thiserror::Error;

/// Fatal errors: a malformed feed or a broken core invariant. Both abort
/// the run — recoverable outcomes (rejects, unpriceable MKT-vs-MKT
/// crosses) are modeled as [`crate::event::Event`]s, never as errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("malformed input row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
