//! Contact domain model and field validation.
//!
//! # Responsibility
//! - Define the canonical contact record persisted by core.
//! - Provide pure validators for phone and email input.
//!
//! # Invariants
//! - Email compared case-insensitively is the unique key of a contact.
//! - `created_at` is captured once at creation and never rewritten.

pub mod contact;
pub mod validation;
