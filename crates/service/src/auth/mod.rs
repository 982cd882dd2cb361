//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Password hashing and session tokens live here; account records themselves are
//! owned by `app_user_service`.

pub mod domain;
pub mod errors;
pub mod password;
pub mod token;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
