use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::record::{self, Fields};
use super::registry::{ResourceKind, ResourceRegistry};
use super::store::ResourceStore;
use crate::errors::ServiceError;
use crate::storage::{Document, JsonDocumentStore};

/// Resource store over the on-disk site document.
#[derive(Clone)]
pub struct JsonResourceStore {
    document: Arc<JsonDocumentStore>,
    registry: ResourceRegistry,
}

impl JsonResourceStore {
    pub fn new(document: Arc<JsonDocumentStore>, registry: ResourceRegistry) -> Arc<Self> {
        Arc::new(Self { document, registry })
    }

    fn require(&self, resource: &str, expected: ResourceKind) -> Result<(), ServiceError> {
        let kind = self.registry.resolve(resource)?;
        if kind != expected {
            let what = match kind {
                ResourceKind::Collection => "a collection",
                ResourceKind::Singleton => "a singleton",
            };
            return Err(ServiceError::Unsupported(format!("'{resource}' is {what}")));
        }
        Ok(())
    }
}

fn collection_mut<'a>(doc: &'a mut Document, resource: &str) -> Result<&'a mut Vec<Value>, ServiceError> {
    match doc.entry(resource.to_string()).or_insert_with(|| Value::Array(Vec::new())) {
        Value::Array(items) => Ok(items),
        _ => Err(ServiceError::Storage(format!("field '{resource}' is not an array"))),
    }
}

#[async_trait]
impl ResourceStore for JsonResourceStore {
    async fn list(&self, resource: &str) -> Result<Value, ServiceError> {
        let kind = self.registry.resolve(resource)?;
        let doc = self.document.load().await?;
        Ok(doc.get(resource).cloned().unwrap_or_else(|| kind.empty_value()))
    }

    async fn create(&self, resource: &str, fields: Fields) -> Result<Value, ServiceError> {
        let kind = self.registry.resolve(resource)?;
        let created = self
            .document
            .transact(|doc| {
                let rec = Value::Object(record::stamp(fields));
                match kind {
                    ResourceKind::Collection => collection_mut(doc, resource)?.push(rec.clone()),
                    ResourceKind::Singleton => {
                        doc.insert(resource.to_string(), rec.clone());
                    }
                }
                Ok(rec)
            })
            .await?;
        info!(%resource, id = ?created.get(record::ID), event = "resource_created", "created record");
        Ok(created)
    }

    async fn update(&self, resource: &str, id: &str, fields: Fields) -> Result<Value, ServiceError> {
        self.require(resource, ResourceKind::Collection)?;
        let updated = self
            .document
            .transact(|doc| {
                let items = match doc.get_mut(resource) {
                    Some(Value::Array(items)) => items,
                    _ => return Err(ServiceError::not_found("record")),
                };
                let existing = items
                    .iter_mut()
                    .find(|r| record::has_id(r, id))
                    .ok_or_else(|| ServiceError::not_found("record"))?;
                if !existing.is_object() {
                    *existing = Value::Object(Map::new());
                }
                if let Value::Object(target) = &mut *existing {
                    record::shallow_merge(target, fields);
                }
                Ok(existing.clone())
            })
            .await?;
        info!(%resource, %id, event = "resource_updated", "updated record");
        Ok(updated)
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<usize, ServiceError> {
        self.require(resource, ResourceKind::Collection)?;
        let removed = self
            .document
            .transact(|doc| {
                let removed = match doc.get_mut(resource) {
                    Some(Value::Array(items)) => {
                        let before = items.len();
                        items.retain(|r| !record::has_id(r, id));
                        before - items.len()
                    }
                    _ => 0,
                };
                Ok(removed)
            })
            .await?;
        if removed == 0 {
            debug!(%resource, %id, "delete matched no record");
        } else {
            info!(%resource, %id, removed, event = "resource_deleted", "deleted record");
        }
        Ok(removed)
    }

    async fn read_singleton(&self, resource: &str) -> Result<Value, ServiceError> {
        self.require(resource, ResourceKind::Singleton)?;
        self.list(resource).await
    }

    async fn update_singleton(&self, resource: &str, fields: Fields) -> Result<Value, ServiceError> {
        self.require(resource, ResourceKind::Singleton)?;
        let merged = self
            .document
            .transact(|doc| {
                let slot = doc
                    .entry(resource.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(current) = &mut *slot {
                    record::shallow_merge(current, fields);
                }
                Ok(slot.clone())
            })
            .await?;
        info!(%resource, event = "singleton_updated", "updated singleton");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::registry::{HERO, MESSAGES, POSTS};
    use serde_json::json;
    use std::path::PathBuf;

    fn fields(v: Value) -> Fields {
        v.as_object().cloned().unwrap_or_default()
    }

    async fn setup() -> Result<(Arc<JsonResourceStore>, PathBuf), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("resource_store_{}.json", uuid::Uuid::new_v4()));
        let registry = ResourceRegistry::site();
        let seed = registry.skeleton();
        let document = JsonDocumentStore::open_or_seed(&path, move || seed).await?;
        Ok((JsonResourceStore::new(document, registry), path))
    }

    #[tokio::test]
    async fn create_then_list_includes_record() -> Result<(), anyhow::Error> {
        let (store, path) = setup().await?;
        let created = store.create(POSTS, fields(json!({"title": "Hello"}))).await?;
        assert_eq!(created["title"], "Hello");
        assert!(!created["id"].as_str().unwrap_or_default().is_empty());
        assert!(created["created_at"].is_string());

        let listed = store.list(POSTS).await?;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert_eq!(listed[0], created);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_after_delete() -> Result<(), anyhow::Error> {
        let (store, path) = setup().await?;
        let a = store.create(POSTS, fields(json!({"n": 1}))).await?;
        let b = store.create(POSTS, fields(json!({"n": 2}))).await?;
        let c = store.create(POSTS, fields(json!({"n": 3}))).await?;

        let removed = store.delete(POSTS, b["id"].as_str().unwrap_or_default()).await?;
        assert_eq!(removed, 1);
        assert_eq!(store.list(POSTS).await?, json!([a, c]));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_and_preserves_identity() -> Result<(), anyhow::Error> {
        let (store, path) = setup().await?;
        let created = store.create(POSTS, fields(json!({"title": "Hello", "body": "text"}))).await?;
        let id = created["id"].as_str().unwrap_or_default().to_string();

        let updated = store.update(POSTS, &id, fields(json!({"title": "Updated"}))).await?;
        assert_eq!(updated["title"], "Updated");
        assert_eq!(updated["body"], "text");
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["created_at"], created["created_at"]);
        assert_eq!(store.list(POSTS).await?[0], updated);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_writes_nothing() -> Result<(), anyhow::Error> {
        let (store, path) = setup().await?;
        store.create(POSTS, fields(json!({"title": "keep"}))).await?;
        let before = tokio::fs::read(&path).await?;

        let res = store.update(POSTS, "missing", fields(json!({"title": "x"}))).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(tokio::fs::read(&path).await?, before);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> Result<(), anyhow::Error> {
        let (store, path) = setup().await?;
        let created = store.create(POSTS, fields(json!({"title": "gone"}))).await?;
        let id = created["id"].as_str().unwrap_or_default().to_string();

        assert_eq!(store.delete(POSTS, &id).await?, 1);
        assert_eq!(store.delete(POSTS, &id).await?, 0);
        assert_eq!(store.delete(POSTS, "never-existed").await?, 0);
        assert_eq!(store.list(POSTS).await?, json!([]));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn hero_update_returns_full_merged_object() -> Result<(), anyhow::Error> {
        let (store, path) = setup().await?;
        assert_eq!(store.read_singleton(HERO).await?, json!({}));

        store.update_singleton(HERO, fields(json!({"title": "Welcome", "subtitle": "Hi"}))).await?;
        let merged = store.update_singleton(HERO, fields(json!({"subtitle": "Hello"}))).await?;
        assert_eq!(merged, json!({"title": "Welcome", "subtitle": "Hello"}));
        assert_eq!(store.read_singleton(HERO).await?, merged);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn create_on_singleton_replaces_value() -> Result<(), anyhow::Error> {
        let (store, path) = setup().await?;
        store.update_singleton(HERO, fields(json!({"old": true}))).await?;
        let created = store.create(HERO, fields(json!({"title": "New"}))).await?;
        let hero = store.read_singleton(HERO).await?;
        assert_eq!(hero, created);
        assert!(hero.get("old").is_none());

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn kind_mismatch_and_unknown_resources_are_rejected() -> Result<(), anyhow::Error> {
        let (store, path) = setup().await?;
        assert!(matches!(store.update(HERO, "1", Fields::new()).await, Err(ServiceError::Unsupported(_))));
        assert!(matches!(store.delete(HERO, "1").await, Err(ServiceError::Unsupported(_))));
        assert!(matches!(store.update_singleton(POSTS, Fields::new()).await, Err(ServiceError::Unsupported(_))));
        assert!(matches!(store.list("admin").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.create("admin", Fields::new()).await, Err(ServiceError::NotFound(_))));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn absent_fields_read_as_empty() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("resource_store_empty_{}.json", uuid::Uuid::new_v4()));
        let document = JsonDocumentStore::open_or_seed(&path, Document::new).await?;
        let store = JsonResourceStore::new(document, ResourceRegistry::site());

        assert_eq!(store.list(MESSAGES).await?, json!([]));
        assert_eq!(store.list(HERO).await?, json!({}));
        assert!(matches!(store.update(MESSAGES, "1", Fields::new()).await, Err(ServiceError::NotFound(_))));

        // create materialises the collection
        store.create(MESSAGES, fields(json!({"name": "A"}))).await?;
        assert_eq!(store.list(MESSAGES).await?.as_array().map(Vec::len), Some(1));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
