//! Message model representing one entry in a thread's ledger

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use super::Attachment;

/// Sender identifier used for messages authored by the local user
pub const ME: &str = "me";

/// Unique identifier for a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single message within a thread
///
/// Messages are immutable once appended to a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    /// `"me"` or the contact's identifier
    pub sender_id: String,
    pub text: String,
    /// Pre-formatted display time
    pub timestamp: String,
    /// Whether the local user authored this message
    pub is_me: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Create a new message builder
    pub fn builder(id: MessageId) -> MessageBuilder {
        MessageBuilder::new(id)
    }
}

/// Builder for creating Message instances
pub struct MessageBuilder {
    id: MessageId,
    sender_id: Option<String>,
    text: String,
    timestamp: Option<String>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    fn new(id: MessageId) -> Self {
        Self {
            id,
            sender_id: None,
            text: String::new(),
            timestamp: None,
            attachments: Vec::new(),
        }
    }

    pub fn sender(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    /// Mark the message as authored by the local user
    pub fn from_me(self) -> Self {
        self.sender(ME)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn build(self) -> Message {
        let sender_id = self.sender_id.unwrap_or_else(|| ME.to_string());
        Message {
            id: self.id,
            is_me: sender_id == ME,
            sender_id,
            text: self.text,
            timestamp: self
                .timestamp
                .unwrap_or_else(|| display_time(&Local::now())),
            attachments: self.attachments,
        }
    }
}

/// Format a time the way message bubbles show it (e.g. "09:41 AM")
pub fn display_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttachmentKind;
    use chrono::Utc;

    #[test]
    fn test_builder_defaults_to_me() {
        let msg = Message::builder(MessageId::new("m1")).text("hi").build();
        assert_eq!(msg.sender_id, ME);
        assert!(msg.is_me);
        assert!(!msg.timestamp.is_empty());
    }

    #[test]
    fn test_builder_contact_sender() {
        let msg = Message::builder(MessageId::new("m2"))
            .sender("1")
            .text("Would love to see the progress.")
            .timestamp("10:05 AM")
            .build();
        assert_eq!(msg.sender_id, "1");
        assert!(!msg.is_me);
        assert_eq!(msg.timestamp, "10:05 AM");
    }

    #[test]
    fn test_display_time_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 14, 7, 0).unwrap();
        assert_eq!(display_time(&at), "02:07 PM");

        let morning = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(display_time(&morning), "09:30 AM");
    }

    #[test]
    fn test_message_json_omits_empty_attachments() {
        let msg = Message::builder(MessageId::new("m1"))
            .sender("3")
            .text("Just following up")
            .timestamp("2 days ago")
            .build();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["senderId"], "3");
        assert_eq!(json["isMe"], false);
        assert!(json.get("attachments").is_none());
    }

    #[test]
    fn test_message_json_with_attachment() {
        let json = r#"{
            "id": "m9",
            "senderId": "me",
            "text": "",
            "timestamp": "10:00 AM",
            "isMe": true,
            "attachments": [{ "name": "a.png", "url": "blob:relay/1", "type": "image" }]
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.attachments.len(), 1);
        assert_eq!(msg.attachments[0].kind, AttachmentKind::Image);
    }
}
