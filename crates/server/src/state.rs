use std::sync::Arc;

use configs::StorageConfig;
use service::{
    file::{FileLeadStore, FileUserStore},
    stores::{LeadStore, UserStore},
};
use tracing::info;

use crate::errors::StartupError;

/// Shared handler state: one handle per record store.
#[derive(Clone)]
pub struct ServerState {
    pub leads: Arc<dyn LeadStore>,
    pub users: Arc<dyn UserStore>,
}

impl ServerState {
    /// Open (or create) both JSON documents under `storage.data_dir`.
    pub async fn open(storage: &StorageConfig) -> Result<Self, StartupError> {
        let leads_path = storage.leads_path();
        let users_path = storage.users_path();
        let leads = FileLeadStore::new(&leads_path).await?;
        let users = FileUserStore::new(&users_path).await?;
        info!(leads = %leads_path.display(), users = %users_path.display(), "record stores ready");
        Ok(Self { leads, users })
    }
}
