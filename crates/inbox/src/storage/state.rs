//! The inbox aggregate and its in-place transitions
//!
//! `InboxState` holds the thread registry, every ledger, every draft and
//! staged file, the active selection, and the routing mode. Stores guard one
//! of these behind a single lock; the methods here assume exclusive access.

use std::collections::HashMap;

use crate::models::{Attachment, Message, MessageId, PendingAttachment, Thread, ThreadId};
use crate::routing::{MobileView, RouteEvent};

#[derive(Debug, Clone)]
pub struct InboxState {
    pub threads: Vec<Thread>,
    pub active_thread_id: ThreadId,
    /// Reply box is in active-edit mode rather than showing the suggestion
    pub is_editing_draft: bool,
    pub drafts: HashMap<ThreadId, String>,
    pub messages: HashMap<ThreadId, Vec<Message>>,
    pub attachments: HashMap<ThreadId, Vec<PendingAttachment>>,
    pub mobile_view: MobileView,
    /// Bumped whenever a thread's staged files change
    staging_gen: HashMap<ThreadId, u64>,
}

impl InboxState {
    /// Build the initial state. `active_thread_id` defaults to the first thread.
    pub fn new(
        threads: Vec<Thread>,
        messages: HashMap<ThreadId, Vec<Message>>,
        active_thread_id: Option<ThreadId>,
    ) -> Self {
        let active_thread_id = active_thread_id
            .or_else(|| threads.first().map(|t| t.id.clone()))
            .unwrap_or_else(|| ThreadId::new(""));

        Self {
            threads,
            active_thread_id,
            is_editing_draft: false,
            drafts: HashMap::new(),
            messages,
            attachments: HashMap::new(),
            mobile_view: MobileView::default(),
            staging_gen: HashMap::new(),
        }
    }

    /// Resolve the active selection, falling back to the first thread
    pub fn active_thread(&self) -> Option<&Thread> {
        self.thread(&self.active_thread_id)
            .or_else(|| self.threads.first())
    }

    pub fn thread(&self, id: &ThreadId) -> Option<&Thread> {
        self.threads.iter().find(|t| &t.id == id)
    }

    /// Ledger for a thread; unknown threads have an empty ledger
    pub fn messages(&self, thread_id: &ThreadId) -> &[Message] {
        self.messages
            .get(thread_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn draft(&self, thread_id: &ThreadId) -> &str {
        self.drafts.get(thread_id).map(String::as_str).unwrap_or("")
    }

    pub fn pending(&self, thread_id: &ThreadId) -> &[PendingAttachment] {
        self.attachments
            .get(thread_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Counter that changes with every edit to a thread's staged files.
    ///
    /// A send compares it before and after resolving blobs to detect
    /// staging that moved underneath it.
    pub fn staging_generation(&self, thread_id: &ThreadId) -> u64 {
        self.staging_gen.get(thread_id).copied().unwrap_or(0)
    }

    fn bump_staging(&mut self, thread_id: &ThreadId) {
        *self.staging_gen.entry(thread_id.clone()).or_default() += 1;
    }

    /// Selecting a thread cancels draft editing and shows the thread pane.
    /// The id is not checked against the registry.
    pub fn select_thread(&mut self, thread_id: ThreadId) {
        self.active_thread_id = thread_id;
        self.is_editing_draft = false;
        self.route(RouteEvent::SelectThread);
    }

    pub fn route(&mut self, event: RouteEvent) {
        self.mobile_view = self.mobile_view.apply(event);
    }

    pub fn set_draft(&mut self, thread_id: ThreadId, text: String) {
        self.drafts.insert(thread_id, text);
    }

    pub fn add_attachments(&mut self, thread_id: ThreadId, files: Vec<PendingAttachment>) {
        self.bump_staging(&thread_id);
        self.attachments.entry(thread_id).or_default().extend(files);
    }

    /// Remove the staged file at `index`; absent indexes are ignored
    pub fn remove_attachment(
        &mut self,
        thread_id: &ThreadId,
        index: usize,
    ) -> Option<PendingAttachment> {
        let files = self.attachments.get_mut(thread_id)?;
        if index >= files.len() {
            return None;
        }
        let removed = files.remove(index);
        self.bump_staging(thread_id);
        Some(removed)
    }

    /// A send needs non-blank text or at least one staged file
    pub fn can_send(&self, thread_id: &ThreadId, text: &str) -> bool {
        !text.trim().is_empty() || !self.pending(thread_id).is_empty()
    }

    /// Append an outgoing message and clear that thread's staging in one step.
    ///
    /// `attachments` must already be resolved from the thread's pending files.
    pub fn commit_send(
        &mut self,
        thread_id: &ThreadId,
        id: MessageId,
        text: &str,
        attachments: Vec<Attachment>,
    ) -> Message {
        let message = Message::builder(id)
            .from_me()
            .text(text)
            .attachments(attachments)
            .build();

        self.messages
            .entry(thread_id.clone())
            .or_default()
            .push(message.clone());
        self.drafts.insert(thread_id.clone(), String::new());
        self.attachments.insert(thread_id.clone(), Vec::new());
        self.bump_staging(thread_id);
        self.is_editing_draft = false;

        message
    }
}
