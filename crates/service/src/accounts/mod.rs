//! Admin and customer account management. Restaurant accounts live in `catalog::restaurant`.

pub mod admin;
pub mod user;
