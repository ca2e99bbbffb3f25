//! File-based blob resolver

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use url::Url;

use super::blob::BlobResolver;
use crate::models::PendingAttachment;

/// Writes each staged file to disk and references it by `file://` URL
///
/// Directory structure:
/// ```text
/// attachments/
///   01/
///     1700000000000-1-report.pdf
///   02/
///     1700000000000-2-photo.png
/// ```
pub struct FileBlobResolver {
    root: PathBuf,
    next_id: AtomicU64,
}

impl FileBlobResolver {
    /// Create a new resolver rooted at the given path
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).context("Failed to create attachment directory")?;
        let root = root
            .canonicalize()
            .context("Failed to canonicalize attachment directory")?;
        Ok(Self {
            root,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the shard directory (low byte of the sequence number)
    fn shard(&self, seq: u64) -> String {
        format!("{:02x}", seq & 0xff)
    }

    fn blob_path(&self, seq: u64, name: &str) -> PathBuf {
        let key = format!("{}-{}", Utc::now().timestamp_millis(), seq);
        self.root
            .join(self.shard(seq))
            .join(format!("{}-{}", key, sanitize_file_name(name)))
    }
}

/// Keep a file name safe to join onto a directory
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "attachment".to_string()
    } else {
        cleaned.to_string()
    }
}

impl BlobResolver for FileBlobResolver {
    fn resolve(&self, file: &PendingAttachment) -> Result<String> {
        let seq = self.next_id.fetch_add(1, Ordering::Relaxed);
        let path = self.blob_path(seq, &file.name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically (write to temp, then rename)
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &file.data)
            .with_context(|| format!("Failed to write attachment: {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)?;

        let url = Url::from_file_path(&path)
            .map_err(|_| anyhow!("Not an absolute path: {}", path.display()))?;
        Ok(url.to_string())
    }

    fn release(&self, url: &str) -> Result<()> {
        let path = Url::parse(url)
            .ok()
            .and_then(|u| u.to_file_path().ok())
            .ok_or_else(|| anyhow!("Not a file URL: {}", url))?;
        if !path.starts_with(&self.root) {
            bail!("Refusing to remove {} outside {}", path.display(), self.root.display());
        }

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove attachment: {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_writes_file() {
        let dir = TempDir::new().unwrap();
        let resolver = FileBlobResolver::new(dir.path()).unwrap();
        let file = PendingAttachment::new("report.pdf", "application/pdf", b"%PDF".to_vec());

        let url = resolver.resolve(&file).unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("report.pdf"));

        let path = Url::parse(&url).unwrap().to_file_path().unwrap();
        assert!(path.starts_with(resolver.root()));
        assert_eq!(fs::read(path).unwrap(), b"%PDF");
    }

    #[test]
    fn test_same_name_does_not_collide() {
        let dir = TempDir::new().unwrap();
        let resolver = FileBlobResolver::new(dir.path()).unwrap();
        let a = PendingAttachment::new("a.txt", "text/plain", b"first".to_vec());
        let b = PendingAttachment::new("a.txt", "text/plain", b"second".to_vec());

        let url_a = resolver.resolve(&a).unwrap();
        let url_b = resolver.resolve(&b).unwrap();
        assert_ne!(url_a, url_b);
    }

    #[test]
    fn test_consecutive_files_use_different_shards() {
        let dir = TempDir::new().unwrap();
        let resolver = FileBlobResolver::new(dir.path()).unwrap();
        let file = PendingAttachment::new("a.txt", "text/plain", vec![1]);

        let shard_of = |url: String| {
            let path = Url::parse(&url).unwrap().to_file_path().unwrap();
            path.parent().unwrap().file_name().unwrap().to_owned()
        };
        let first = shard_of(resolver.resolve(&file).unwrap());
        let second = shard_of(resolver.resolve(&file).unwrap());
        assert_eq!(first, "01");
        assert_eq!(second, "02");
    }

    #[test]
    fn test_release_removes_file() {
        let dir = TempDir::new().unwrap();
        let resolver = FileBlobResolver::new(dir.path()).unwrap();
        let url = resolver
            .resolve(&PendingAttachment::new("a.txt", "text/plain", b"x".to_vec()))
            .unwrap();
        let path = Url::parse(&url).unwrap().to_file_path().unwrap();
        assert!(path.exists());

        resolver.release(&url).unwrap();
        assert!(!path.exists());
        resolver.release(&url).unwrap();
    }

    #[test]
    fn test_release_rejects_foreign_paths() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let resolver = FileBlobResolver::new(dir.path()).unwrap();

        let victim = outside.path().join("keep.txt");
        fs::write(&victim, b"keep").unwrap();
        let url = Url::from_file_path(victim.canonicalize().unwrap()).unwrap();

        assert!(resolver.release(url.as_str()).is_err());
        assert!(resolver.release("blob:relay/1").is_err());
        assert!(victim.exists());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_file_name("photo.png"), "photo.png");
        assert_eq!(sanitize_file_name(""), "attachment");
        assert_eq!(sanitize_file_name(".."), "attachment");
    }
}
