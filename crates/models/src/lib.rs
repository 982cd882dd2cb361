//! Persistence layer: sea-orm entities for the HR portal, field validation and
//! connection helpers. Every table except the join/credential tables carries the
//! same lifecycle columns (`status`, `created_at`, `updated_at`, `deleted_at`).

pub mod errors;
pub mod db;
pub mod enums;
pub mod validate;
pub mod sector;
pub mod company;
pub mod app_user;
pub mod user_credentials;
pub mod user_role;
pub mod leave;
pub mod cash_advance;

#[cfg(test)]
mod tests;
