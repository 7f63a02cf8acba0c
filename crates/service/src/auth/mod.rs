//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Admins, restaurants and users each log in against their own table; a
//! successful login yields an HS256 bearer token whose `role` claim drives
//! route protection in the server crate.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use domain::{Principal, Role};
pub use service::AuthService;
