use async_trait::async_trait;
use serde_json::Value;

use super::record::Fields;
use crate::errors::ServiceError;

/// CRUD over named resources of the site document.
///
/// Implementations decide how the document is persisted; handlers and the
/// contact service only see this trait.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Field value verbatim; empty array/object when the field is absent.
    async fn list(&self, resource: &str) -> Result<Value, ServiceError>;
    /// Stamp `fields` with `id` and `created_at`, then append (collection)
    /// or replace (singleton).
    async fn create(&self, resource: &str, fields: Fields) -> Result<Value, ServiceError>;
    /// Shallow-merge `fields` into the record with `id`; `NotFound` if absent.
    async fn update(&self, resource: &str, id: &str, fields: Fields) -> Result<Value, ServiceError>;
    /// Remove every record with `id`; returns how many were removed.
    async fn delete(&self, resource: &str, id: &str) -> Result<usize, ServiceError>;
    async fn read_singleton(&self, resource: &str) -> Result<Value, ServiceError>;
    /// Shallow-merge `fields` into the singleton and return the full object.
    async fn update_singleton(&self, resource: &str, fields: Fields) -> Result<Value, ServiceError>;
}
