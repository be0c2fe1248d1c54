//! Service layer for the content API.
//! - `storage`: the on-disk JSON document and its serialised mutations.
//! - `resource`: collection/singleton CRUD on top of the document.
//! - `contact`: contact intake with a pluggable notifier.
//! - `auth`: admin credential check.

pub mod errors;
pub mod auth;
pub mod runtime;
pub mod storage;
pub mod resource;
pub mod contact;
