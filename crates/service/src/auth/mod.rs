//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Checks the single admin credential stored in the site document. No
//! session or token is issued; a login only answers yes or no.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
