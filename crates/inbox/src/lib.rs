//! Inbox crate - Business logic for the messaging inbox
//!
//! This crate provides platform-independent inbox functionality including:
//! - Domain models (Thread, Message, Attachment)
//! - A single-aggregate store with drafts, staged attachments, and the
//!   atomic send transaction
//! - List/thread view routing for narrow viewports
//! - Pluggable blob resolution for attachment content
//! - Query API for UI consumption
//! - Seed loading from the config directory
//!
//! This crate has zero UI dependencies and exports a UniFFI facade for
//! Swift/Kotlin hosts.

uniffi::setup_scaffolding!();

pub mod error;
pub mod ffi;
pub mod models;
pub mod query;
pub mod routing;
pub mod seed;
pub mod storage;

pub use error::InboxError;
pub use models::{
    Attachment, AttachmentKind, Channel, Classification, Contact, ME, Message, MessageId,
    PendingAttachment, Thread, ThreadId, Urgency,
};
pub use query::{
    ThreadDetail, ThreadSummary, count_unread, filter_by_classification,
    get_active_thread_detail, get_thread_messages, list_threads, search_threads,
};
pub use routing::{MobileView, RouteEvent};
pub use seed::InboxSeed;
pub use storage::{
    BlobResolver, FileBlobResolver, InMemoryInboxStore, InboxState, InboxStore, ObjectUrlResolver,
};
