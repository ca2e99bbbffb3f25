//! Thread query functions

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::{Channel, Classification, Message, Thread, ThreadId, Urgency};
use crate::storage::{InboxState, InboxStore};

/// Summary information for displaying a thread in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub id: ThreadId,
    pub contact_name: String,
    pub avatar: String,
    pub channel: Channel,
    pub subject: Option<String>,
    pub last_message: String,
    pub time: String,
    pub classification: Classification,
    pub urgency: Urgency,
    pub is_unread: bool,
    /// Messages currently in the thread's ledger
    pub message_count: usize,
    /// Whether an unsent draft is waiting
    pub has_draft: bool,
    /// Files staged for the next send
    pub pending_attachments: usize,
    pub is_active: bool,
}

impl ThreadSummary {
    fn from_state(thread: &Thread, state: &InboxState) -> Self {
        Self {
            id: thread.id.clone(),
            contact_name: thread.contact.name.clone(),
            avatar: thread.contact.avatar.clone(),
            channel: thread.channel,
            subject: thread.subject.clone(),
            last_message: thread.last_message.clone(),
            time: thread.time.clone(),
            classification: thread.classification,
            urgency: thread.urgency,
            is_unread: thread.is_unread,
            message_count: state.messages(&thread.id).len(),
            has_draft: !state.draft(&thread.id).trim().is_empty(),
            pending_attachments: state.pending(&thread.id).len(),
            is_active: state
                .active_thread()
                .is_some_and(|active| active.id == thread.id),
        }
    }
}

/// Detailed thread information including all messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadDetail {
    pub thread: Thread,
    /// All messages in the thread, in append order
    pub messages: Vec<Message>,
    /// Current draft text for the reply box
    pub draft: String,
}

fn summarize<F>(store: &dyn InboxStore, mut keep: F) -> Result<Vec<ThreadSummary>>
where
    F: FnMut(&Thread) -> bool,
{
    let state = store.snapshot()?;
    Ok(state
        .threads
        .iter()
        .filter(|t| keep(*t))
        .map(|t| ThreadSummary::from_state(t, &state))
        .collect())
}

/// List every thread in registry order
pub fn list_threads(store: &dyn InboxStore) -> Result<Vec<ThreadSummary>> {
    summarize(store, |_| true)
}

/// Threads whose contact name, subject, or preview contains `query`
///
/// Matching is case-insensitive. A blank query matches everything.
pub fn search_threads(store: &dyn InboxStore, query: &str) -> Result<Vec<ThreadSummary>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return list_threads(store);
    }

    summarize(store, |t| {
        t.contact.name.to_lowercase().contains(&needle)
            || t
                .subject
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&needle))
            || t.last_message.to_lowercase().contains(&needle)
    })
}

pub fn filter_by_classification(
    store: &dyn InboxStore,
    classification: Classification,
) -> Result<Vec<ThreadSummary>> {
    summarize(store, |t| t.classification == classification)
}

/// Number of threads flagged unread
pub fn count_unread(store: &dyn InboxStore) -> Result<usize> {
    Ok(store.list_threads()?.iter().filter(|t| t.is_unread).count())
}

/// Messages for a thread; same contract as `InboxStore::get_messages`
pub fn get_thread_messages(store: &dyn InboxStore, thread_id: &ThreadId) -> Result<Vec<Message>> {
    store.get_messages(thread_id)
}

/// The active thread with its ledger and draft, read from one snapshot
///
/// Messages and draft are keyed by the raw selection, so an unknown
/// selection shows the fallback thread with an empty ledger.
pub fn get_active_thread_detail(store: &dyn InboxStore) -> Result<Option<ThreadDetail>> {
    let state = store.snapshot()?;
    let Some(thread) = state.active_thread().cloned() else {
        return Ok(None);
    };

    let selected = &state.active_thread_id;
    Ok(Some(ThreadDetail {
        thread,
        messages: state.messages(selected).to_vec(),
        draft: state.draft(selected).to_string(),
    }))
}
