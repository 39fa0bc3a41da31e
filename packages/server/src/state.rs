use crate::auth::AuthGate;
use crate::config::Config;
use crate::storage::ObjectStorage;
use crate::upload::UploadService;
use crate::ServerError;
use folio_editor::{Document, EditSession};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state behind every route
pub struct AppState {
    pub session: RwLock<EditSession>,
    pub auth: AuthGate,
    pub uploads: UploadService,
    pub sign_in_url: String,
}

impl AppState {
    pub fn new(
        config: &Config,
        document: Document,
        storage: Arc<dyn ObjectStorage>,
    ) -> Result<Self, ServerError> {
        Ok(Self {
            session: RwLock::new(EditSession::new("local", document)),
            auth: AuthGate::from_config(config)?,
            uploads: UploadService::new(storage, config),
            sign_in_url: config.sign_in_url.clone(),
        })
    }
}
