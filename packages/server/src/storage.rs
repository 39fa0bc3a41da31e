//! Object storage backends for uploaded images.
//!
//! An upload is two calls: write the object, then mint a URL that fetches
//! it. Both backends here keep the contract of a remote bucket: keys are
//! `/`-separated and the minted URL expires.

use crate::config::{StorageConfig, StorageKind};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid object key: {0:?}")]
    InvalidKey(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;

    /// Mint a URL that fetches `key` until `expires_in` has passed.
    async fn presign(&self, key: &str, expires_in: Duration) -> Result<String, StorageError>;
}

pub fn storage_from_config(config: &StorageConfig) -> Arc<dyn ObjectStorage> {
    match config.kind {
        StorageKind::Fs => Arc::new(FsObjectStorage::new(
            config.root.clone(),
            config.public_base_url.clone(),
        )),
        StorageKind::Memory => Arc::new(MemoryObjectStorage::new(config.public_base_url.clone())),
    }
}

/// Keys must be relative, non-empty and free of `.`/`..` segments.
fn check_key(key: &str) -> Result<(), StorageError> {
    let path = Path::new(key);
    let well_formed = !key.is_empty()
        && !key.ends_with('/')
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if well_formed {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Percent-encodes each `/`-separated segment of `key` so the URL path
/// survives spaces, non-ASCII names and reserved characters.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| {
            let mut encoded = String::with_capacity(segment.len());
            for byte in segment.bytes() {
                match byte {
                    b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                        encoded.push(byte as char)
                    }
                    _ => encoded.push_str(&format!("%{:02X}", byte)),
                }
            }
            encoded
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn object_url(base: &str, key: &str, expires_in: Duration) -> String {
    let expires_at = chrono::Utc::now()
        + chrono::Duration::from_std(expires_in).unwrap_or_else(|_| chrono::Duration::zero());
    format!(
        "{}/{}?expires={}",
        base.trim_end_matches('/'),
        encode_key(key),
        expires_at.timestamp()
    )
}

/// Writes objects under a local directory; the server serves that directory
/// at `/uploads` so minted URLs resolve in development.
pub struct FsObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl FsObjectStorage {
    #[must_use]
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ObjectStorage for FsObjectStorage {
    fn backend_tag(&self) -> &'static str {
        "fs"
    }

    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        check_key(key)?;
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn presign(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        check_key(key)?;
        if tokio::fs::metadata(self.root.join(key)).await.is_err() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(object_url(&self.public_base_url, key, expires_in))
    }
}

/// Which call an injected failure hits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Put,
    Presign,
}

/// In-memory backend with failure and latency injection for tests.
pub struct MemoryObjectStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    public_base_url: String,
    fail: Option<FailPoint>,
    delay: Option<(FailPoint, Duration)>,
}

impl MemoryObjectStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            public_base_url: public_base_url.into(),
            fail: None,
            delay: None,
        }
    }

    pub fn failing_at(mut self, point: FailPoint) -> Self {
        self.fail = Some(point);
        self
    }

    pub fn slow_at(mut self, point: FailPoint, delay: Duration) -> Self {
        self.delay = Some((point, delay));
        self
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().await.get(key).cloned()
    }

    async fn inject(&self, point: FailPoint) -> Result<(), StorageError> {
        if let Some((slow, delay)) = self.delay {
            if slow == point {
                tokio::time::sleep(delay).await;
            }
        }
        if self.fail == Some(point) {
            return Err(StorageError::Unavailable(format!("injected {:?} failure", point)));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        check_key(key)?;
        self.inject(FailPoint::Put).await?;
        self.objects.lock().await.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn presign(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        self.inject(FailPoint::Presign).await?;
        if !self.objects.lock().await.contains_key(key) {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(object_url(&self.public_base_url, key, expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_checks() {
        assert!(check_key("from_editor/cover.png").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("../etc/passwd").is_err());
        assert!(check_key("/abs.png").is_err());
        assert!(check_key("from_editor/").is_err());
    }

    #[tokio::test]
    async fn test_fs_put_then_presign() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsObjectStorage::new(
            dir.path().to_path_buf(),
            "http://127.0.0.1:3030/uploads/".to_string(),
        );

        storage
            .put_object("from_editor/a.png", b"png".to_vec(), Some("image/png"))
            .await
            .unwrap();
        let url = storage
            .presign("from_editor/a.png", Duration::from_secs(60))
            .await
            .unwrap();

        assert!(url.starts_with("http://127.0.0.1:3030/uploads/from_editor/a.png?expires="));
        assert_eq!(
            std::fs::read(dir.path().join("from_editor/a.png")).unwrap(),
            b"png"
        );
    }

    #[test]
    fn test_encode_key_segments() {
        assert_eq!(encode_key("from_editor/cover.png"), "from_editor/cover.png");
        assert_eq!(encode_key("from_editor/my cover.png"), "from_editor/my%20cover.png");
        assert_eq!(encode_key("a#b?.png"), "a%23b%3F.png");
        assert_eq!(encode_key("封面.png"), "%E5%B0%81%E9%9D%A2.png");
    }

    #[tokio::test]
    async fn test_minted_url_is_a_valid_image_url() {
        let storage = MemoryObjectStorage::new("https://bucket.example");
        for key in ["from_editor/my cover.png", "from_editor/封面.png", "from_editor/a#1?.png"] {
            storage.put_object(key, b"png".to_vec(), None).await.unwrap();
            let url = storage.presign(key, Duration::from_secs(60)).await.unwrap();
            assert!(folio_model::is_valid_url(&url), "{}", url);
        }
    }

    #[tokio::test]
    async fn test_presign_missing_object() {
        let storage = MemoryObjectStorage::new("https://bucket.example");
        let err = storage
            .presign("nope.png", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let storage = MemoryObjectStorage::new("https://bucket.example").failing_at(FailPoint::Put);
        let err = storage
            .put_object("a.png", vec![1], None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(storage.get("a.png").await.is_none());
    }
}
