//! Storage abstractions for service layer
//!
//! The whole site lives in one JSON document on disk; `json_document`
//! owns reading it, writing it back and serialising mutations.

pub mod json_document;

pub use json_document::{Document, JsonDocumentStore};
