//! Storage trait definitions

use crate::models::{Message, PendingAttachment, Thread, ThreadId};
use crate::routing::MobileView;
use anyhow::Result;

use super::InboxState;

/// Trait for inbox storage operations
///
/// Lookups are permissive: unknown thread ids read as empty ledgers, empty
/// drafts, and empty staging lists rather than errors. Errors are reserved
/// for broken plumbing (poisoned locks, failed blob resolution).
pub trait InboxStore: Send + Sync {
    /// All seeded threads, in registry order
    fn list_threads(&self) -> Result<Vec<Thread>>;

    /// The selected thread, or the first thread if the selection is unknown
    fn get_active_thread(&self) -> Result<Thread>;

    fn active_thread_id(&self) -> Result<ThreadId>;

    /// Messages for a thread in append order (empty for unknown threads)
    fn get_messages(&self, thread_id: &ThreadId) -> Result<Vec<Message>>;

    /// Select a thread: cancels draft editing and switches to the thread view
    fn set_active_thread_id(&self, thread_id: &ThreadId) -> Result<()>;

    fn is_editing_draft(&self) -> Result<bool>;

    fn set_is_editing_draft(&self, editing: bool) -> Result<()>;

    fn get_draft(&self, thread_id: &ThreadId) -> Result<String>;

    /// Overwrite the draft for one thread
    fn set_draft(&self, thread_id: &ThreadId, text: &str) -> Result<()>;

    fn get_attachments(&self, thread_id: &ThreadId) -> Result<Vec<PendingAttachment>>;

    /// Append files to a thread's staging list, in call order
    fn add_attachments(&self, thread_id: &ThreadId, files: Vec<PendingAttachment>) -> Result<()>;

    /// Remove the staged file at `index`. Returns `None` if there was none.
    fn remove_attachment(
        &self,
        thread_id: &ThreadId,
        index: usize,
    ) -> Result<Option<PendingAttachment>>;

    /// Send a reply on a thread
    ///
    /// Returns `Ok(None)` without touching anything when `text` is blank and
    /// nothing is staged. Otherwise appends the message, clears the thread's
    /// draft and staged files, and ends draft editing in one transition.
    fn send_message(&self, thread_id: &ThreadId, text: &str) -> Result<Option<Message>>;

    fn mobile_view(&self) -> Result<MobileView>;

    fn set_mobile_view(&self, view: MobileView) -> Result<()>;

    /// Return to the thread list
    fn go_back(&self) -> Result<()>;

    /// Consistent copy of the whole aggregate
    fn snapshot(&self) -> Result<InboxState>;
}
