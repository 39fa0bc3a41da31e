//! # Folio Server
//!
//! HTTP shell around one editing session: the live preview page, the
//! session API used by the browser editor, and the image upload endpoint.
//! Every route passes the email-domain auth gate.

pub mod auth;
pub mod config;
mod errors;
pub mod server;
pub mod state;
pub mod storage;
pub mod upload;

pub use auth::{is_allowed_email, AuthError, AuthGate, Identity};
pub use config::{Config, ConfigError, StorageConfig, StorageKind, DEFAULT_CONFIG_NAME};
pub use errors::{ActionResponse, ApiError, ServerError};
pub use server::{build_router, MAX_UPLOAD_BYTES};
pub use state::AppState;
pub use storage::{
    storage_from_config, FailPoint, FsObjectStorage, MemoryObjectStorage, ObjectStorage,
    StorageError,
};
pub use upload::{UploadError, UploadService, UploadStage, UploadedObject};

use folio_editor::Document;
use std::sync::Arc;

/// Serve `document` until the process is stopped
pub async fn serve(config: Config, document: Document) -> Result<(), ServerError> {
    let storage = storage_from_config(&config.storage);
    let uploads_dir = match config.storage.kind {
        StorageKind::Fs => {
            tokio::fs::create_dir_all(&config.storage.root).await?;
            Some(config.storage.root.clone())
        }
        StorageKind::Memory => None,
    };

    let state = Arc::new(AppState::new(&config, document, storage)?);
    let app = build_router(state, uploads_dir);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, storage = ?config.storage.kind, "folio server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
