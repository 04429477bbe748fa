use crate::domain::{Lead, NewLead};
use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for the append-only demo-request collection.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// All leads in submission order.
    async fn list(&self) -> Result<Vec<Lead>, ServiceError>;
    /// Stamp id and creation time, append, persist.
    async fn create(&self, input: NewLead) -> Result<Lead, ServiceError>;
}
