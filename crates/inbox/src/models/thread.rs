//! Thread model representing a conversation with one contact

use serde::{Deserialize, Serialize};

/// Unique identifier for a thread
///
/// Join key into the message ledger, drafts, and pending attachments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ThreadId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The external party on the other end of a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name (e.g., "Killan James")
    pub name: String,
    /// Avatar image reference
    pub avatar: String,
    /// Role label (e.g., "Client", "Vendor")
    pub role: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        avatar: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
            role: role.into(),
        }
    }
}

/// Channel the conversation arrives through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    /// Chat platform (WhatsApp)
    #[serde(rename = "whatsapp")]
    WhatsApp,
}

impl Channel {
    /// Human-readable channel name for thread headers
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::WhatsApp => "WhatsApp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Sales,
    Support,
    Personal,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Whether the thread header should carry an "Urgent" marker
    pub fn is_urgent(&self) -> bool {
        matches!(self, Urgency::High)
    }
}

/// A thread represents a conversation with a single contact
///
/// Threads are seeded once and never created, renamed, or removed at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: ThreadId,
    pub contact: Contact,
    #[serde(rename = "type")]
    pub channel: Channel,
    /// Subject line (email threads usually have one, chats don't)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Preview text of the latest message
    pub last_message: String,
    /// Pre-formatted display time of the last activity (not sortable)
    pub time: String,
    pub classification: Classification,
    pub urgency: Urgency,
    #[serde(default)]
    pub is_unread: bool,
    /// Suggested reply shown before the user starts editing
    #[serde(default)]
    pub ai_draft: String,
}

impl Thread {
    /// Create a new thread with the given properties
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ThreadId,
        contact: Contact,
        channel: Channel,
        subject: Option<String>,
        last_message: String,
        time: String,
        classification: Classification,
        urgency: Urgency,
        is_unread: bool,
        ai_draft: String,
    ) -> Self {
        Self {
            id,
            contact,
            channel,
            subject,
            last_message,
            time,
            classification,
            urgency,
            is_unread,
            ai_draft,
        }
    }
}
