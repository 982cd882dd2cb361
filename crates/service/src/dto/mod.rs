//! Data transfer objects (input of service calls) and view models (output for display).

pub mod user;
pub mod company;
pub mod sector;
pub mod leave;
pub mod cash_advance;
