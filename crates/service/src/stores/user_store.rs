use crate::domain::{NewUser, User, UserPatch};
use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for client profile storage.
/// Implementations can be file-backed, database-backed, or remote.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, ServiceError>;
    async fn get(&self, id: &str) -> Result<User, ServiceError>;
    async fn create(&self, input: NewUser) -> Result<User, ServiceError>;
    /// Shallow-merge `patch` into the record; `NotFound` leaves the store untouched.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, ServiceError>;
    /// Remove and return the record; `NotFound` leaves the store untouched.
    async fn delete(&self, id: &str) -> Result<User, ServiceError>;
}
