//! InboxService facade for UniFFI export
//!
//! This provides a high-level, FFI-friendly API over the inbox store,
//! query helpers, and seed loading.

use std::sync::Arc;

use anyhow::anyhow;

use crate::ffi::types::*;
use crate::models::{PendingAttachment, ThreadId};
use crate::query;
use crate::seed::InboxSeed;
use crate::storage::{BlobResolver, InMemoryInboxStore, InboxStore};

/// Adapts the host's resolver callback to `BlobResolver`
struct HostBlobResolver {
    callback: Box<dyn BlobResolverCallback>,
}

impl BlobResolver for HostBlobResolver {
    fn resolve(&self, file: &PendingAttachment) -> anyhow::Result<String> {
        self.callback
            .resolve(FfiPendingAttachment::from(file.clone()))
            .map_err(|e| anyhow!("{}", e))
    }

    fn release(&self, url: &str) -> anyhow::Result<()> {
        self.callback
            .release(url.to_string())
            .map_err(|e| anyhow!("{}", e))
    }
}

/// Main service object for inbox operations
///
/// This is the entry point for Swift/Kotlin code. Every mutation is applied
/// to a single store, so reads never observe a half-finished send.
#[derive(uniffi::Object)]
pub struct InboxService {
    store: Arc<InMemoryInboxStore>,
}

#[uniffi::export]
impl InboxService {
    /// Create a service from a JSON seed
    ///
    /// Pass `None` to load `inbox-seed.json` from the config directory, or
    /// the built-in demo conversations if that file doesn't exist.
    #[uniffi::constructor]
    pub fn new(
        seed_json: Option<String>,
        resolver: Box<dyn BlobResolverCallback>,
    ) -> Result<Arc<Self>, InboxFfiError> {
        let seed = match seed_json {
            Some(json) => InboxSeed::from_json(&json).map_err(|e| {
                InboxFfiError::InvalidArgument {
                    message: format!("{:#}", e),
                }
            })?,
            None => InboxSeed::load()?,
        };

        let resolver = Arc::new(HostBlobResolver { callback: resolver });
        let store = InMemoryInboxStore::new(seed, resolver)?;
        Ok(Arc::new(Self {
            store: Arc::new(store),
        }))
    }

    // ========================================================================
    // Threads
    // ========================================================================

    pub fn list_threads(&self) -> Result<Vec<FfiThreadSummary>, InboxFfiError> {
        let threads = query::list_threads(self.store.as_ref())?;
        Ok(threads.into_iter().map(FfiThreadSummary::from).collect())
    }

    /// Case-insensitive search over contact name, subject, and preview
    pub fn search_threads(&self, query: String) -> Result<Vec<FfiThreadSummary>, InboxFfiError> {
        let threads = query::search_threads(self.store.as_ref(), &query)?;
        Ok(threads.into_iter().map(FfiThreadSummary::from).collect())
    }

    pub fn filter_by_classification(
        &self,
        classification: FfiClassification,
    ) -> Result<Vec<FfiThreadSummary>, InboxFfiError> {
        let threads =
            query::filter_by_classification(self.store.as_ref(), classification.into())?;
        Ok(threads.into_iter().map(FfiThreadSummary::from).collect())
    }

    pub fn count_unread(&self) -> Result<u32, InboxFfiError> {
        Ok(query::count_unread(self.store.as_ref())? as u32)
    }

    /// The selected thread, or the first thread if the selection is unknown
    pub fn get_active_thread(&self) -> Result<FfiThread, InboxFfiError> {
        Ok(self.store.get_active_thread()?.into())
    }

    pub fn get_active_thread_detail(&self) -> Result<Option<FfiThreadDetail>, InboxFfiError> {
        let detail = query::get_active_thread_detail(self.store.as_ref())?;
        Ok(detail.map(FfiThreadDetail::from))
    }

    pub fn active_thread_id(&self) -> Result<String, InboxFfiError> {
        Ok(self.store.active_thread_id()?.0)
    }

    /// Select a thread; cancels draft editing and shows the thread pane
    pub fn set_active_thread_id(&self, thread_id: String) -> Result<(), InboxFfiError> {
        self.store.set_active_thread_id(&ThreadId::new(thread_id))?;
        Ok(())
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Messages in append order; empty for unknown threads
    pub fn get_messages(&self, thread_id: String) -> Result<Vec<FfiMessage>, InboxFfiError> {
        let messages = query::get_thread_messages(self.store.as_ref(), &ThreadId::new(thread_id))?;
        Ok(messages.into_iter().map(FfiMessage::from).collect())
    }

    /// Send a reply. Returns `None` when there was nothing to send.
    pub fn send_message(
        &self,
        thread_id: String,
        text: String,
    ) -> Result<Option<FfiMessage>, InboxFfiError> {
        let sent = self.store.send_message(&ThreadId::new(thread_id), &text)?;
        Ok(sent.map(FfiMessage::from))
    }

    // ========================================================================
    // Drafts & Attachments
    // ========================================================================

    pub fn get_draft(&self, thread_id: String) -> Result<String, InboxFfiError> {
        Ok(self.store.get_draft(&ThreadId::new(thread_id))?)
    }

    pub fn set_draft(&self, thread_id: String, text: String) -> Result<(), InboxFfiError> {
        self.store.set_draft(&ThreadId::new(thread_id), &text)?;
        Ok(())
    }

    pub fn is_editing_draft(&self) -> Result<bool, InboxFfiError> {
        Ok(self.store.is_editing_draft()?)
    }

    pub fn set_is_editing_draft(&self, editing: bool) -> Result<(), InboxFfiError> {
        self.store.set_is_editing_draft(editing)?;
        Ok(())
    }

    pub fn get_attachments(
        &self,
        thread_id: String,
    ) -> Result<Vec<FfiPendingAttachment>, InboxFfiError> {
        let files = self.store.get_attachments(&ThreadId::new(thread_id))?;
        Ok(files.into_iter().map(FfiPendingAttachment::from).collect())
    }

    pub fn add_attachments(
        &self,
        thread_id: String,
        files: Vec<FfiPendingAttachment>,
    ) -> Result<(), InboxFfiError> {
        let files = files.into_iter().map(PendingAttachment::from).collect();
        self.store.add_attachments(&ThreadId::new(thread_id), files)?;
        Ok(())
    }

    /// Remove a staged file by position. Returns false if there was none.
    pub fn remove_attachment(&self, thread_id: String, index: u32) -> Result<bool, InboxFfiError> {
        let removed = self
            .store
            .remove_attachment(&ThreadId::new(thread_id), index as usize)?;
        Ok(removed.is_some())
    }

    // ========================================================================
    // View Routing
    // ========================================================================

    pub fn mobile_view(&self) -> Result<FfiMobileView, InboxFfiError> {
        Ok(self.store.mobile_view()?.into())
    }

    pub fn set_mobile_view(&self, view: FfiMobileView) -> Result<(), InboxFfiError> {
        self.store.set_mobile_view(view.into())?;
        Ok(())
    }

    pub fn go_back(&self) -> Result<(), InboxFfiError> {
        self.store.go_back()?;
        Ok(())
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Install the Rust log bridge and route records to `callback`
///
/// Call once at startup. Later calls only swap the callback and level.
#[uniffi::export]
pub fn initialize_logging(callback: Box<dyn LogCallback>, max_level: FfiLogLevel) {
    // A second install fails because a logger is already set; that's fine
    let _ = crate::ffi::init_ffi_logger(max_level);
    crate::ffi::set_log_callback(Some(Arc::from(callback)));
    crate::ffi::set_log_level(max_level);
}

/// Classify a MIME type the way sent attachments are classified
#[uniffi::export]
pub fn classify_attachment(mime_type: String) -> FfiAttachmentKind {
    crate::models::AttachmentKind::classify(&mime_type).into()
}

/// The built-in demo seed as JSON, for hosts that want to edit it
#[uniffi::export]
pub fn builtin_seed_json() -> String {
    serde_json::to_string_pretty(&InboxSeed::builtin()).unwrap_or_else(|_| "{}".to_string())
}
