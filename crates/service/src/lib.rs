//! Service layer providing business operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod metrics;
pub mod images;
pub mod booking;
pub mod order;
pub mod catalog;
pub mod accounts;
pub(crate) mod util;
#[cfg(test)]
pub mod test_support;
