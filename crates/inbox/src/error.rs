//! Error types for the inbox store

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InboxError {
    /// The store was constructed without any threads to fall back to
    #[error("thread registry is empty")]
    EmptyRegistry,

    #[error("inbox state lock poisoned")]
    LockPoisoned,

    /// The blob resolver could not produce a reference for a staged file
    #[error("failed to resolve attachment {name}: {message}")]
    BlobResolution { name: String, message: String },

    /// Staged files kept changing while a send was resolving them
    #[error("attachments on thread {thread} changed during send")]
    StagingChanged { thread: String },
}
