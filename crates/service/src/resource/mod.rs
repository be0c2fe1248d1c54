//! Generic resources kept as top-level fields of the site document.
//!
//! A resource is either an ordered collection of records or a single
//! object, fixed at registration time in a [`ResourceRegistry`].

pub mod json_store;
pub mod record;
pub mod registry;
pub mod store;

pub use json_store::JsonResourceStore;
pub use record::Fields;
pub use registry::{ResourceKind, ResourceRegistry};
pub use store::ResourceStore;
