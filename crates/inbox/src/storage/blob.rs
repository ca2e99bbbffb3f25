//! Blob resolution for staged attachments
//!
//! A resolver turns a raw staged file into a content reference a message
//! bubble can display. The host decides what that reference is.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Result, anyhow};

use crate::models::PendingAttachment;

/// URL scheme prefix handed out by `ObjectUrlResolver`
const OBJECT_URL_PREFIX: &str = "blob:relay/";

/// Trait for turning staged files into displayable references
///
/// Called once per file while a send is in flight, with no store lock held,
/// so implementations may read the store.
pub trait BlobResolver: Send + Sync {
    fn resolve(&self, file: &PendingAttachment) -> Result<String>;

    /// Drop a reference that never made it into a message
    fn release(&self, _url: &str) -> Result<()> {
        Ok(())
    }
}

/// In-process object URL registry
///
/// Keeps file contents in memory and hands out `blob:relay/<n>` references
/// until they are revoked.
pub struct ObjectUrlResolver {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    next_id: AtomicU64,
}

impl ObjectUrlResolver {
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Contents behind a reference, if it is still registered
    pub fn get(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| anyhow!("object url registry poisoned"))?;
        Ok(blobs.get(url).cloned())
    }

    /// Release a reference. Returns whether it was registered.
    pub fn revoke(&self, url: &str) -> Result<bool> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| anyhow!("object url registry poisoned"))?;
        Ok(blobs.remove(url).is_some())
    }

    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ObjectUrlResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobResolver for ObjectUrlResolver {
    fn resolve(&self, file: &PendingAttachment) -> Result<String> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}{}", OBJECT_URL_PREFIX, id);
        self.blobs
            .write()
            .map_err(|_| anyhow!("object url registry poisoned"))?
            .insert(url.clone(), file.data.clone());
        Ok(url)
    }

    fn release(&self, url: &str) -> Result<()> {
        self.revoke(url)?;
        Ok(())
    }
}
