//! Two-stage image upload: write the object, then mint its URL. Either
//! stage failing (or running past the timeout) fails the whole upload and
//! names the stage.

use crate::config::Config;
use crate::storage::{ObjectStorage, StorageError};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStage {
    Uploading,
    Presigning,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStage::Uploading => f.write_str("uploading"),
            UploadStage::Presigning => f.write_str("presigning"),
        }
    }
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("{stage} failed: {source}")]
    Storage {
        stage: UploadStage,
        #[source]
        source: StorageError,
    },

    #[error("{stage} timed out after {}s", .timeout.as_secs())]
    TimedOut {
        stage: UploadStage,
        timeout: Duration,
    },
}

impl UploadError {
    /// The storage stage that failed, if the failure happened in storage
    pub fn stage(&self) -> Option<UploadStage> {
        match self {
            UploadError::InvalidFileName(_) => None,
            UploadError::Storage { stage, .. } | UploadError::TimedOut { stage, .. } => {
                Some(*stage)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedObject {
    pub key: String,
    pub url: String,
}

pub struct UploadService {
    storage: Arc<dyn ObjectStorage>,
    key_prefix: String,
    timeout: Duration,
    presign_expiry: Duration,
}

impl UploadService {
    pub fn new(storage: Arc<dyn ObjectStorage>, config: &Config) -> Self {
        Self {
            storage,
            key_prefix: config.storage.key_prefix.clone(),
            timeout: config.upload_timeout(),
            presign_expiry: Duration::from_secs(config.storage.presign_expiry_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Object key for an uploaded file: the configured prefix plus the
    /// file's base name.
    pub fn object_key(&self, file_name: &str) -> Result<String, UploadError> {
        let base = Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| UploadError::InvalidFileName(file_name.to_string()))?;
        Ok(format!("{}{}", self.key_prefix, base))
    }

    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<UploadedObject, UploadError> {
        let key = self.object_key(file_name)?;
        let size = bytes.len();

        self.run_stage(
            UploadStage::Uploading,
            self.storage.put_object(&key, bytes, content_type),
        )
        .await?;
        let url = self
            .run_stage(
                UploadStage::Presigning,
                self.storage.presign(&key, self.presign_expiry),
            )
            .await?;

        tracing::info!(
            backend = self.storage.backend_tag(),
            key = %key,
            size,
            "uploaded object"
        );
        Ok(UploadedObject { key, url })
    }

    async fn run_stage<T>(
        &self,
        stage: UploadStage,
        call: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, UploadError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|source| UploadError::Storage { stage, source }),
            Err(_) => Err(UploadError::TimedOut {
                stage,
                timeout: self.timeout,
            }),
        }
    }
}
