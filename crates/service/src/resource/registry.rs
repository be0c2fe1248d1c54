use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::errors::ServiceError;
use crate::storage::Document;

pub const POSTS: &str = "posts";
pub const SERVICES: &str = "services";
pub const METRICS: &str = "metrics";
pub const PROCESS: &str = "process";
pub const MESSAGES: &str = "messages";
pub const HERO: &str = "hero";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Ordered array of records, each with `id` and `created_at`.
    Collection,
    /// One object, updated by shallow merge.
    Singleton,
}

impl ResourceKind {
    /// Value returned when the field is absent from the document.
    pub fn empty_value(self) -> Value {
        match self {
            ResourceKind::Collection => Value::Array(Vec::new()),
            ResourceKind::Singleton => Value::Object(Map::new()),
        }
    }
}

/// Names of the document fields exposed as resources and their kind.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    kinds: BTreeMap<String, ResourceKind>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.kinds.insert(name.into(), ResourceKind::Collection);
        self
    }

    pub fn singleton(mut self, name: impl Into<String>) -> Self {
        self.kinds.insert(name.into(), ResourceKind::Singleton);
        self
    }

    /// The site's resources: five collections plus the `hero` singleton.
    pub fn site() -> Self {
        Self::new()
            .collection(POSTS)
            .collection(SERVICES)
            .collection(METRICS)
            .collection(PROCESS)
            .collection(MESSAGES)
            .singleton(HERO)
    }

    pub fn kind(&self, name: &str) -> Option<ResourceKind> {
        self.kinds.get(name).copied()
    }

    /// Kind of `name`, or `NotFound` for names that are not registered.
    pub fn resolve(&self, name: &str) -> Result<ResourceKind, ServiceError> {
        self.kind(name)
            .ok_or_else(|| ServiceError::NotFound(format!("unknown resource '{name}'")))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ResourceKind)> {
        self.kinds.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Document with every registered resource present and empty.
    pub fn skeleton(&self) -> Document {
        self.iter()
            .map(|(name, kind)| (name.to_string(), kind.empty_value()))
            .collect()
    }
}
