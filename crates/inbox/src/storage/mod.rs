//! Storage traits and implementations
//!
//! The whole inbox lives in one aggregate (`InboxState`) so that every
//! operation, the send transaction in particular, swaps state in a single
//! step. Attachment contents are turned into displayable references by a
//! pluggable `BlobResolver`.

mod blob;
mod blob_file;
mod memory;
mod state;
mod traits;

pub use blob::{BlobResolver, ObjectUrlResolver};
pub use blob_file::FileBlobResolver;
pub use memory::InMemoryInboxStore;
pub use state::InboxState;
pub use traits::InboxStore;
