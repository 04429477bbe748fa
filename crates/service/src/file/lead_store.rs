use std::sync::Arc;

use crate::domain::{created_now, Lead, NewLead};
use crate::errors::ServiceError;
use crate::storage::{fresh_id, json_list_store::JsonListStore};
use crate::stores::LeadStore;

/// Top-level key of the lead document.
pub const LEADS_COLLECTION: &str = "responses";

/// Demo requests persisted as `{"responses": [...]}`.
#[derive(Clone)]
pub struct FileLeadStore {
    store: Arc<JsonListStore<Lead>>,
}

impl FileLeadStore {
    /// Open the document, creating an empty one if the file does not exist.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Lead>::open(path, LEADS_COLLECTION).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn list(&self) -> Result<Vec<Lead>, ServiceError> {
        self.store.read_all().await
    }

    pub async fn create(&self, input: NewLead) -> Result<Lead, ServiceError> {
        self.store
            .update_with(move |leads| {
                let id = fresh_id(|candidate| leads.iter().any(|l| l.id == candidate));
                let lead = Lead::from_input(id, input, created_now());
                leads.push(lead.clone());
                Ok(lead)
            })
            .await
    }
}

#[async_trait::async_trait]
impl LeadStore for FileLeadStore {
    async fn list(&self) -> Result<Vec<Lead>, ServiceError> { self.list().await }
    async fn create(&self, input: NewLead) -> Result<Lead, ServiceError> { self.create(input).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_store_path;
    use std::collections::HashSet;

    fn form(name: &str) -> NewLead {
        NewLead {
            name: name.into(),
            phone: "5550100".into(),
            email: format!("{}@example.com", name.to_lowercase()),
            occupation: "Caregiver".into(),
        }
    }

    #[tokio::test]
    async fn create_appends_in_order_with_unique_ids() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("lead_store_order");
        let store = FileLeadStore::new(&tmp).await?;

        let started = chrono::Utc::now();
        let mut created = Vec::new();
        for name in ["Ann", "Ben", "Cy", "Di"] {
            created.push(store.create(form(name)).await?);
        }

        let ids: HashSet<_> = created.iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids.len(), created.len());
        // created_now truncates to milliseconds
        let floor = started - chrono::Duration::milliseconds(1);
        assert!(created.iter().all(|l| l.created_at >= floor));

        let listed = store.list().await?;
        assert_eq!(listed, created);
        assert_eq!(listed[2].name, "Cy");
        assert_eq!(listed[2].email, "cy@example.com");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn leads_survive_reopen_under_responses_key() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("lead_store_reopen");
        let store = FileLeadStore::new(&tmp).await?;
        let lead = store.create(form("Eve")).await?;

        let raw: serde_json::Value = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert_eq!(raw["responses"][0]["id"], lead.id.as_str());
        assert_eq!(raw["responses"][0]["occupation"], "Caregiver");

        let reopened = FileLeadStore::new(&tmp).await?;
        assert_eq!(reopened.list().await?, vec![lead]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
