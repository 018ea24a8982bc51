//! Error types for blockrs.

/// Errors that can occur while blocking a stream.
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    /// An I/O error occurred in a reader or writer adapter.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// `push()` was called after the stream was finished.
    #[error("push after finish: the stream has already been finalized")]
    PushAfterFinish,

    /// `finish()` was called more than once.
    #[error("finish called more than once")]
    AlreadyFinished,

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl BlockError {
    /// Returns true if this error reports a violation of the
    /// push-then-finish-once contract.
    ///
    /// Misuse is a programming error in the caller, not a stream failure.
    pub fn is_misuse(&self) -> bool {
        matches!(self, BlockError::PushAfterFinish | BlockError::AlreadyFinished)
    }
}

impl From<BlockError> for std::io::Error {
    fn from(e: BlockError) -> Self {
        match e {
            BlockError::Io(e) => e,
            other => std::io::Error::other(other),
        }
    }
}
