//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract used by the contact store.
//! - Keep file format details inside the persistence boundary.
//!
//! # Invariants
//! - A save always writes the whole collection; there is no partial write mode.
//! - Load never fails the caller; unreadable data degrades to an empty book.

pub mod contact_repo;
