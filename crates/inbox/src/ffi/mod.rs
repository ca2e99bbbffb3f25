//! FFI bindings for UniFFI export
//!
//! This module provides Swift/Kotlin bindings for the inbox crate via UniFFI.
//!
//! ## Usage from Swift
//!
//! ```swift
//! import InboxFFI
//!
//! // Initialize logging first
//! initializeLogging(callback: myLogCallback, maxLevel: .info)
//!
//! // Attachment content is materialized by the host
//! let service = try InboxService(seedJson: nil, resolver: ObjectUrlResolver())
//!
//! try service.setActiveThreadId(threadId: "1")
//! try service.setDraft(threadId: "1", text: "Hello")
//! let sent = try service.sendMessage(threadId: "1", text: "Hello")
//! ```

mod logging;
mod service;
mod types;

pub use logging::{init_ffi_logger, set_log_callback, set_log_level};
pub use service::*;
pub use types::*;
