use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::errors::ServiceError;

/// One record collection persisted as `{ "<collection>": [ ... ] }` in a JSON file.
///
/// Nothing is cached between calls: every operation loads the document from
/// disk and every mutation writes the whole document back, so the file stays
/// the only source of truth. Operations on one store instance are serialized
/// behind a mutex; there is no protection against other processes writing the
/// same file. Top-level keys other than the collection are carried through
/// untouched.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    collection: &'static str,
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

struct Document<T> {
    rest: Map<String, Value>,
    items: Vec<T>,
}

impl<T> Document<T> {
    fn empty() -> Self {
        Self { rest: Map::new(), items: Vec::new() }
    }
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    /// Open the store at `path`. Creates the file holding an empty collection
    /// if missing; an existing file that does not parse is an error.
    pub async fn open<P: Into<PathBuf>>(path: P, collection: &'static str) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("{}: {e}", parent.display())))?;
        }

        let store = Self { file_path, collection, lock: Mutex::new(()), _records: PhantomData };
        match store.read_document().await? {
            Some(doc) => {
                debug!(path = %store.file_path.display(), collection, records = doc.items.len(), "opened json store");
            }
            None => {
                store.write_document(Document::empty()).await?;
                debug!(path = %store.file_path.display(), collection, "created empty json store");
            }
        }
        Ok(Arc::new(store))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// All records in stored order.
    pub async fn read_all(&self) -> Result<Vec<T>, ServiceError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.items)
    }

    /// Load the collection, run `f` on it and persist the result.
    /// When `f` fails nothing is written and the error is returned as-is.
    pub async fn update_with<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError> + Send,
        R: Send,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        let out = f(&mut doc.items)?;
        self.write_document(doc).await?;
        Ok(out)
    }

    async fn load(&self) -> Result<Document<T>, ServiceError> {
        Ok(self.read_document().await?.unwrap_or_else(Document::empty))
    }

    /// `None` when the file does not exist.
    async fn read_document(&self) -> Result<Option<Document<T>>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.storage_error(e)),
        };

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| self.corrupt(e))?;
        let Value::Object(mut rest) = value else {
            return Err(self.corrupt("top level is not an object"));
        };
        let items = match rest.remove(self.collection) {
            Some(list) => serde_json::from_value(list).map_err(|e| self.corrupt(e))?,
            None => Vec::new(),
        };
        Ok(Some(Document { rest, items }))
    }

    async fn write_document(&self, doc: Document<T>) -> Result<(), ServiceError> {
        let Document { mut rest, items } = doc;
        let list = serde_json::to_value(items).map_err(|e| self.storage_error(e))?;
        rest.insert(self.collection.to_string(), list);
        let data = serde_json::to_vec_pretty(&Value::Object(rest)).map_err(|e| self.storage_error(e))?;
        fs::write(&self.file_path, data).await.map_err(|e| self.storage_error(e))?;
        Ok(())
    }

    fn storage_error(&self, e: impl std::fmt::Display) -> ServiceError {
        ServiceError::Storage(format!("{}: {e}", self.file_path.display()))
    }

    fn corrupt(&self, e: impl std::fmt::Display) -> ServiceError {
        ServiceError::Corrupt(format!("{}: {e}", self.file_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_store_path;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        n: u32,
    }

    fn item(id: &str, n: u32) -> Item {
        Item { id: id.into(), n }
    }

    #[tokio::test]
    async fn creates_missing_file_with_empty_collection() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("json_list_store_new");
        let store = JsonListStore::<Item>::open(&tmp, "items").await?;
        assert!(store.read_all().await?.is_empty());

        let on_disk: Value = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert_eq!(on_disk, serde_json::json!({ "items": [] }));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn every_call_reads_the_file() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("json_list_store_reload");
        let writer = JsonListStore::<Item>::open(&tmp, "items").await?;
        let reader = JsonListStore::<Item>::open(&tmp, "items").await?;

        writer.update_with(|items| { items.push(item("a", 1)); Ok(()) }).await?;
        writer.update_with(|items| { items.push(item("b", 2)); Ok(()) }).await?;
        assert_eq!(reader.read_all().await?, vec![item("a", 1), item("b", 2)]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_mutation_writes_nothing() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("json_list_store_abort");
        let store = JsonListStore::<Item>::open(&tmp, "items").await?;
        store.update_with(|items| { items.push(item("a", 1)); Ok(()) }).await?;
        let before = tokio::fs::read(&tmp).await?;

        let res: Result<(), _> = store
            .update_with(|items| {
                items.clear();
                Err(ServiceError::not_found("item"))
            })
            .await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(tokio::fs::read(&tmp).await?, before);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_fails_loudly_and_is_left_alone() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("json_list_store_corrupt");
        tokio::fs::write(&tmp, b"{ \"items\": [ {\"id\": ").await?;

        assert!(matches!(JsonListStore::<Item>::open(&tmp, "items").await, Err(ServiceError::Corrupt(_))));
        assert_eq!(tokio::fs::read(&tmp).await?, b"{ \"items\": [ {\"id\": ".to_vec());

        tokio::fs::write(&tmp, b"[]").await?;
        assert!(matches!(JsonListStore::<Item>::open(&tmp, "items").await, Err(ServiceError::Corrupt(_))));

        tokio::fs::write(&tmp, b"{\"items\": {\"id\": \"a\"}}").await?;
        assert!(matches!(JsonListStore::<Item>::open(&tmp, "items").await, Err(ServiceError::Corrupt(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corruption_after_open_surfaces_on_next_call() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("json_list_store_late_corrupt");
        let store = JsonListStore::<Item>::open(&tmp, "items").await?;
        tokio::fs::write(&tmp, b"not json").await?;

        assert!(matches!(store.read_all().await, Err(ServiceError::Corrupt(_))));
        let res = store.update_with(|items| { items.push(item("a", 1)); Ok(()) }).await;
        assert!(matches!(res, Err(ServiceError::Corrupt(_))));
        assert_eq!(tokio::fs::read(&tmp).await?, b"not json".to_vec());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn other_top_level_keys_survive_writes() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("json_list_store_foreign");
        tokio::fs::write(&tmp, br#"{"items": [], "meta": {"owner": "ops"}}"#).await?;
        let store = JsonListStore::<Item>::open(&tmp, "items").await?;
        store.update_with(|items| { items.push(item("a", 1)); Ok(()) }).await?;

        let on_disk: Value = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert_eq!(on_disk["meta"]["owner"], "ops");
        assert_eq!(on_disk["items"][0]["id"], "a");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
