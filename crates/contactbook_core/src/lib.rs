//! Core domain logic for the contact book.
//! This crate is the single source of truth for contact invariants.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ContactBookConfig};
pub use error::{ContactError, ContactResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, CreatedAt, NewContact};
pub use model::validation::{validate_email, validate_phone};
pub use repo::contact_repo::{
    ContactRepository, JsonFileContactRepository, PersistError, PersistResult,
};
pub use service::contact_service::{ContactStatistics, ContactStore};
pub use service::stats::{domain_histogram, DomainCount, DomainHistogram, TOP_DOMAIN_LIMIT};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
