//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory contact collection for the process lifetime.
//! - Orchestrate validation, mutation and persistence.
//! - Derive read-only statistics over the collection.

pub mod contact_service;
pub mod stats;
