use std::sync::Arc;

use crate::domain::{created_now, NewUser, User, UserPatch};
use crate::errors::ServiceError;
use crate::storage::{fresh_id, json_list_store::JsonListStore};
use crate::stores::UserStore;

/// Top-level key of the user document.
pub const USERS_COLLECTION: &str = "users";

/// Client profiles persisted as `{"users": [...]}`.
#[derive(Clone)]
pub struct FileUserStore {
    store: Arc<JsonListStore<User>>,
}

impl FileUserStore {
    /// Open the document, creating an empty one if the file does not exist.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<User>::open(path, USERS_COLLECTION).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        self.store.read_all().await
    }

    pub async fn get(&self, id: &str) -> Result<User, ServiceError> {
        self.store
            .read_all()
            .await?
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    pub async fn create(&self, input: NewUser) -> Result<User, ServiceError> {
        self.store
            .update_with(move |users| {
                let id = fresh_id(|candidate| users.iter().any(|u| u.id == candidate));
                let user = User::from_input(id, input, created_now());
                users.push(user.clone());
                Ok(user)
            })
            .await
    }

    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<User, ServiceError> {
        self.store
            .update_with(move |users| {
                let existing = users
                    .iter_mut()
                    .find(|u| u.id == id)
                    .ok_or_else(|| ServiceError::not_found("user"))?;
                existing.apply(patch);
                Ok(existing.clone())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<User, ServiceError> {
        self.store
            .update_with(move |users| {
                let idx = users
                    .iter()
                    .position(|u| u.id == id)
                    .ok_or_else(|| ServiceError::not_found("user"))?;
                Ok(users.remove(idx))
            })
            .await
    }
}

#[async_trait::async_trait]
impl UserStore for FileUserStore {
    async fn list(&self) -> Result<Vec<User>, ServiceError> { self.list().await }
    async fn get(&self, id: &str) -> Result<User, ServiceError> { self.get(id).await }
    async fn create(&self, input: NewUser) -> Result<User, ServiceError> { self.create(input).await }
    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: &str) -> Result<User, ServiceError> { self.delete(id).await }
}
