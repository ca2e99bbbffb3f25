//! FFI-friendly type wrappers for UniFFI export
//!
//! These types convert internal Rust types to FFI-compatible versions:
//! - `ThreadId`/`MessageId` → `String`
//! - `usize` counts and indexes → `u32`
//! - Host callbacks for blob resolution and logging

use crate::error::InboxError;
use crate::models::{
    Attachment, AttachmentKind, Channel, Classification, Contact, Message, PendingAttachment,
    Thread, Urgency,
};
use crate::query::{ThreadDetail, ThreadSummary};
use crate::routing::MobileView;

// ============================================================================
// Error Types
// ============================================================================

/// FFI-friendly error type
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum InboxFfiError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for InboxFfiError {
    fn from(e: anyhow::Error) -> Self {
        let message = format!("{:#}", e);
        match e.downcast_ref::<InboxError>() {
            Some(InboxError::EmptyRegistry) => InboxFfiError::InvalidArgument { message },
            Some(InboxError::BlobResolution { .. }) | Some(InboxError::StagingChanged { .. }) => {
                InboxFfiError::Storage { message }
            }
            Some(InboxError::LockPoisoned) | None => InboxFfiError::Internal { message },
        }
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for InboxFfiError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        InboxFfiError::Internal { message: e.reason }
    }
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiChannel {
    Email,
    WhatsApp,
}

impl From<Channel> for FfiChannel {
    fn from(c: Channel) -> Self {
        match c {
            Channel::Email => FfiChannel::Email,
            Channel::WhatsApp => FfiChannel::WhatsApp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiClassification {
    Sales,
    Support,
    Personal,
    Urgent,
}

impl From<Classification> for FfiClassification {
    fn from(c: Classification) -> Self {
        match c {
            Classification::Sales => FfiClassification::Sales,
            Classification::Support => FfiClassification::Support,
            Classification::Personal => FfiClassification::Personal,
            Classification::Urgent => FfiClassification::Urgent,
        }
    }
}

impl From<FfiClassification> for Classification {
    fn from(c: FfiClassification) -> Self {
        match c {
            FfiClassification::Sales => Classification::Sales,
            FfiClassification::Support => Classification::Support,
            FfiClassification::Personal => Classification::Personal,
            FfiClassification::Urgent => Classification::Urgent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiUrgency {
    High,
    Medium,
    Low,
}

impl From<Urgency> for FfiUrgency {
    fn from(u: Urgency) -> Self {
        match u {
            Urgency::High => FfiUrgency::High,
            Urgency::Medium => FfiUrgency::Medium,
            Urgency::Low => FfiUrgency::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiAttachmentKind {
    Image,
    File,
}

impl From<AttachmentKind> for FfiAttachmentKind {
    fn from(k: AttachmentKind) -> Self {
        match k {
            AttachmentKind::Image => FfiAttachmentKind::Image,
            AttachmentKind::File => FfiAttachmentKind::File,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiMobileView {
    List,
    Thread,
}

impl From<MobileView> for FfiMobileView {
    fn from(v: MobileView) -> Self {
        match v {
            MobileView::List => FfiMobileView::List,
            MobileView::Thread => FfiMobileView::Thread,
        }
    }
}

impl From<FfiMobileView> for MobileView {
    fn from(v: FfiMobileView) -> Self {
        match v {
            FfiMobileView::List => MobileView::List,
            FfiMobileView::Thread => MobileView::Thread,
        }
    }
}

// ============================================================================
// Thread Types
// ============================================================================

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiContact {
    pub name: String,
    pub avatar: String,
    pub role: String,
}

impl From<Contact> for FfiContact {
    fn from(c: Contact) -> Self {
        Self {
            name: c.name,
            avatar: c.avatar,
            role: c.role,
        }
    }
}

/// FFI-friendly thread representation
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiThread {
    pub id: String,
    pub contact: FfiContact,
    pub channel: FfiChannel,
    /// "Email" or "WhatsApp"
    pub channel_label: String,
    pub subject: Option<String>,
    pub last_message: String,
    pub time: String,
    pub classification: FfiClassification,
    pub urgency: FfiUrgency,
    pub is_urgent: bool,
    pub is_unread: bool,
    pub ai_draft: String,
}

impl From<Thread> for FfiThread {
    fn from(t: Thread) -> Self {
        Self {
            id: t.id.0,
            contact: t.contact.into(),
            channel: t.channel.into(),
            channel_label: t.channel.label().to_string(),
            subject: t.subject,
            last_message: t.last_message,
            time: t.time,
            classification: t.classification.into(),
            urgency: t.urgency.into(),
            is_urgent: t.urgency.is_urgent(),
            is_unread: t.is_unread,
            ai_draft: t.ai_draft,
        }
    }
}

/// FFI-friendly thread summary for sidebar rows
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiThreadSummary {
    pub id: String,
    pub contact_name: String,
    pub avatar: String,
    pub channel: FfiChannel,
    pub subject: Option<String>,
    pub last_message: String,
    pub time: String,
    pub classification: FfiClassification,
    pub urgency: FfiUrgency,
    pub is_unread: bool,
    pub message_count: u32,
    pub has_draft: bool,
    pub pending_attachments: u32,
    pub is_active: bool,
}

impl From<ThreadSummary> for FfiThreadSummary {
    fn from(s: ThreadSummary) -> Self {
        Self {
            id: s.id.0,
            contact_name: s.contact_name,
            avatar: s.avatar,
            channel: s.channel.into(),
            subject: s.subject,
            last_message: s.last_message,
            time: s.time,
            classification: s.classification.into(),
            urgency: s.urgency.into(),
            is_unread: s.is_unread,
            message_count: s.message_count as u32,
            has_draft: s.has_draft,
            pending_attachments: s.pending_attachments as u32,
            is_active: s.is_active,
        }
    }
}

/// FFI-friendly thread detail with messages
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiThreadDetail {
    pub thread: FfiThread,
    pub messages: Vec<FfiMessage>,
    pub draft: String,
}

impl From<ThreadDetail> for FfiThreadDetail {
    fn from(d: ThreadDetail) -> Self {
        Self {
            thread: d.thread.into(),
            messages: d.messages.into_iter().map(FfiMessage::from).collect(),
            draft: d.draft,
        }
    }
}

// ============================================================================
// Message Types
// ============================================================================

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAttachment {
    pub name: String,
    pub url: String,
    pub kind: FfiAttachmentKind,
}

impl From<Attachment> for FfiAttachment {
    fn from(a: Attachment) -> Self {
        Self {
            name: a.name,
            url: a.url,
            kind: a.kind.into(),
        }
    }
}

/// FFI-friendly message representation
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMessage {
    pub id: String,
    pub sender_id: String,
    pub text: String,
    pub timestamp: String,
    pub is_me: bool,
    pub attachments: Vec<FfiAttachment>,
}

impl From<Message> for FfiMessage {
    fn from(m: Message) -> Self {
        Self {
            id: m.id.0,
            sender_id: m.sender_id,
            text: m.text,
            timestamp: m.timestamp,
            is_me: m.is_me,
            attachments: m.attachments.into_iter().map(FfiAttachment::from).collect(),
        }
    }
}

/// A file picked by the user, staged for the next send
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPendingAttachment {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl From<FfiPendingAttachment> for PendingAttachment {
    fn from(f: FfiPendingAttachment) -> Self {
        PendingAttachment::new(f.name, f.mime_type, f.data)
    }
}

impl From<PendingAttachment> for FfiPendingAttachment {
    fn from(f: PendingAttachment) -> Self {
        Self {
            name: f.name,
            mime_type: f.mime_type,
            data: f.data,
        }
    }
}

// ============================================================================
// Blob Resolution Callback
// ============================================================================

/// Callback interface the host implements to materialize attachment content
///
/// Return a reference the UI can load (object URL, file URL, upload URL).
/// Throwing aborts the send and leaves the draft and staged files in place.
/// Both methods are called with no store lock held.
#[uniffi::export(callback_interface)]
pub trait BlobResolverCallback: Send + Sync {
    fn resolve(&self, file: FfiPendingAttachment) -> Result<String, InboxFfiError>;

    /// Discard a reference from an aborted send
    fn release(&self, url: String) -> Result<(), InboxFfiError>;
}

// ============================================================================
// Log Callback
// ============================================================================

/// Log level for FFI callback
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum FfiLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<log::Level> for FfiLogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => FfiLogLevel::Error,
            log::Level::Warn => FfiLogLevel::Warn,
            log::Level::Info => FfiLogLevel::Info,
            log::Level::Debug => FfiLogLevel::Debug,
            log::Level::Trace => FfiLogLevel::Trace,
        }
    }
}

impl From<FfiLogLevel> for log::LevelFilter {
    fn from(level: FfiLogLevel) -> Self {
        match level {
            FfiLogLevel::Error => log::LevelFilter::Error,
            FfiLogLevel::Warn => log::LevelFilter::Warn,
            FfiLogLevel::Info => log::LevelFilter::Info,
            FfiLogLevel::Debug => log::LevelFilter::Debug,
            FfiLogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Callback interface for receiving log messages from Rust
#[uniffi::export(callback_interface)]
pub trait LogCallback: Send + Sync {
    /// * `target` - The logging target (typically module path, e.g., "inbox::storage")
    fn on_log(&self, level: FfiLogLevel, target: String, message: String);
}
