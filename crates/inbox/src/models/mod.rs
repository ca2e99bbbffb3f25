//! Domain models for inbox entities

mod attachment;
mod message;
mod thread;

pub use attachment::{Attachment, AttachmentKind, PendingAttachment};
pub use message::{ME, Message, MessageBuilder, MessageId, display_time};
pub use thread::{Channel, Classification, Contact, Thread, ThreadId, Urgency};
