//! Service layer providing the HR portal's business operations on top of `models`.
//! - Separates business rules (approval flow, ownership, lifecycle) from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - DTOs and view models in [`dto`] shape the input and output of every call.

pub mod errors;
pub mod auth;
pub mod dto;
pub mod app_user_service;
pub mod company_service;
pub mod sector_service;
pub mod leave_service;
pub mod cash_advance_service;
pub mod bootstrap;
#[cfg(test)]
pub mod test_support;
