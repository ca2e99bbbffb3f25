//! Attachment models: files staged for sending and their resolved references

use serde::{Deserialize, Serialize};

/// Display kind of a sent attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    File,
}

impl AttachmentKind {
    /// Classify a MIME type: anything under `image/` renders inline as an image
    pub fn classify(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            AttachmentKind::Image
        } else {
            AttachmentKind::File
        }
    }
}

/// A sent attachment, resolved to a displayable content reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    /// Content reference produced by a `BlobResolver`
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
}

/// A raw file staged for the next send, not yet resolved
#[derive(Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl PendingAttachment {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Size of the file contents in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::classify(&self.mime_type)
    }

    /// Pair this file with the reference it was resolved to
    pub fn into_attachment(self, url: String) -> Attachment {
        Attachment {
            kind: self.kind(),
            name: self.name,
            url,
        }
    }
}

impl std::fmt::Debug for PendingAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAttachment")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.data.len())
            .finish()
    }
}
