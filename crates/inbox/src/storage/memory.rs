//! In-memory storage implementation

use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{BlobResolver, InboxState, InboxStore, ObjectUrlResolver};
use crate::error::InboxError;
use crate::models::{Attachment, Message, MessageId, PendingAttachment, Thread, ThreadId};
use crate::routing::{MobileView, RouteEvent};
use crate::seed::InboxSeed;

/// Attempts a send makes before giving up on staging that keeps changing
const MAX_SEND_ATTEMPTS: usize = 3;

/// In-memory implementation of InboxStore
///
/// The whole aggregate sits behind one RwLock, so every operation (and a
/// send's append-and-clear in particular) is observed all at once or not at all.
/// Blob resolution runs outside the lock.
pub struct InMemoryInboxStore {
    state: RwLock<InboxState>,
    resolver: Arc<dyn BlobResolver>,
    /// Disambiguates message ids minted within the same millisecond
    next_seq: AtomicU64,
}

impl InMemoryInboxStore {
    /// Create a store from seed data
    ///
    /// Fails with `InboxError::EmptyRegistry` if the seed has no threads, since
    /// the active-thread fallback needs at least one.
    pub fn new(seed: InboxSeed, resolver: Arc<dyn BlobResolver>) -> Result<Self> {
        if seed.threads.is_empty() {
            return Err(InboxError::EmptyRegistry.into());
        }

        info!(
            "Opening inbox with {} threads, {} seeded messages",
            seed.threads.len(),
            seed.messages.values().map(Vec::len).sum::<usize>()
        );

        let state = InboxState::new(seed.threads, seed.messages, seed.active_thread_id);
        Ok(Self {
            state: RwLock::new(state),
            resolver,
            next_seq: AtomicU64::new(1),
        })
    }

    /// Create a store that resolves attachments to in-process object URLs
    pub fn with_object_urls(seed: InboxSeed) -> Result<Self> {
        Self::new(seed, Arc::new(ObjectUrlResolver::new()))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, InboxState>> {
        self.state.read().map_err(|_| InboxError::LockPoisoned.into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, InboxState>> {
        self.state.write().map_err(|_| InboxError::LockPoisoned.into())
    }

    fn next_message_id(&self) -> MessageId {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        MessageId::new(format!("{}-{}", Utc::now().timestamp_millis(), seq))
    }

    /// Resolve every file, releasing the ones already resolved if any fails
    fn resolve_all(&self, files: &[PendingAttachment]) -> Result<Vec<Attachment>> {
        let mut resolved = Vec::with_capacity(files.len());
        for file in files {
            match self.resolver.resolve(file) {
                Ok(url) => resolved.push(file.clone().into_attachment(url)),
                Err(e) => {
                    self.release_all(&resolved);
                    return Err(InboxError::BlobResolution {
                        name: file.name.clone(),
                        message: format!("{:#}", e),
                    }
                    .into());
                }
            }
        }
        Ok(resolved)
    }

    fn release_all(&self, attachments: &[Attachment]) {
        for attachment in attachments {
            if let Err(e) = self.resolver.release(&attachment.url) {
                warn!("Failed to release {}: {:#}", attachment.url, e);
            }
        }
    }
}

impl InboxStore for InMemoryInboxStore {
    fn list_threads(&self) -> Result<Vec<Thread>> {
        Ok(self.read()?.threads.clone())
    }

    fn get_active_thread(&self) -> Result<Thread> {
        let state = self.read()?;
        state
            .active_thread()
            .cloned()
            .ok_or_else(|| InboxError::EmptyRegistry.into())
    }

    fn active_thread_id(&self) -> Result<ThreadId> {
        Ok(self.read()?.active_thread_id.clone())
    }

    fn get_messages(&self, thread_id: &ThreadId) -> Result<Vec<Message>> {
        Ok(self.read()?.messages(thread_id).to_vec())
    }

    fn set_active_thread_id(&self, thread_id: &ThreadId) -> Result<()> {
        let mut state = self.write()?;
        if state.thread(thread_id).is_none() {
            debug!("Selecting unknown thread {}", thread_id.as_str());
        }
        state.select_thread(thread_id.clone());
        Ok(())
    }

    fn is_editing_draft(&self) -> Result<bool> {
        Ok(self.read()?.is_editing_draft)
    }

    fn set_is_editing_draft(&self, editing: bool) -> Result<()> {
        self.write()?.is_editing_draft = editing;
        Ok(())
    }

    fn get_draft(&self, thread_id: &ThreadId) -> Result<String> {
        Ok(self.read()?.draft(thread_id).to_string())
    }

    fn set_draft(&self, thread_id: &ThreadId, text: &str) -> Result<()> {
        self.write()?.set_draft(thread_id.clone(), text.to_string());
        Ok(())
    }

    fn get_attachments(&self, thread_id: &ThreadId) -> Result<Vec<PendingAttachment>> {
        Ok(self.read()?.pending(thread_id).to_vec())
    }

    fn add_attachments(&self, thread_id: &ThreadId, files: Vec<PendingAttachment>) -> Result<()> {
        debug!("Staging {} files on thread {}", files.len(), thread_id.as_str());
        self.write()?.add_attachments(thread_id.clone(), files);
        Ok(())
    }

    fn remove_attachment(
        &self,
        thread_id: &ThreadId,
        index: usize,
    ) -> Result<Option<PendingAttachment>> {
        let removed = self.write()?.remove_attachment(thread_id, index);
        if removed.is_none() {
            debug!(
                "No staged file at index {} on thread {}",
                index,
                thread_id.as_str()
            );
        }
        Ok(removed)
    }

    fn send_message(&self, thread_id: &ThreadId, text: &str) -> Result<Option<Message>> {
        for attempt in 1..=MAX_SEND_ATTEMPTS {
            let (files, generation) = {
                let state = self.read()?;
                if !state.can_send(thread_id, text) {
                    debug!("Ignoring empty send on thread {}", thread_id.as_str());
                    return Ok(None);
                }
                (
                    state.pending(thread_id).to_vec(),
                    state.staging_generation(thread_id),
                )
            };

            // No lock held here: the resolver may be slow or call back into the store
            let attachments = self.resolve_all(&files)?;

            let mut state = self.write()?;
            if state.staging_generation(thread_id) != generation {
                drop(state);
                debug!(
                    "Staging on thread {} changed during send (attempt {})",
                    thread_id.as_str(),
                    attempt
                );
                self.release_all(&attachments);
                continue;
            }

            let id = self.next_message_id();
            let message = state.commit_send(thread_id, id, text, attachments);
            drop(state);

            info!(
                "Sent message {} on thread {} ({} attachments)",
                message.id.as_str(),
                thread_id.as_str(),
                message.attachments.len()
            );
            return Ok(Some(message));
        }

        Err(InboxError::StagingChanged {
            thread: thread_id.as_str().to_string(),
        }
        .into())
    }

    fn mobile_view(&self) -> Result<MobileView> {
        Ok(self.read()?.mobile_view)
    }

    fn set_mobile_view(&self, view: MobileView) -> Result<()> {
        self.write()?.route(RouteEvent::Set(view));
        Ok(())
    }

    fn go_back(&self) -> Result<()> {
        self.write()?.route(RouteEvent::GoBack);
        Ok(())
    }

    fn snapshot(&self) -> Result<InboxState> {
        Ok(self.read()?.clone())
    }
}
