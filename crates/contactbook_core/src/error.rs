//! Contact-level error kinds surfaced to callers.
//!
//! # Invariants
//! - Validation and lookup failures are values, never panics.
//! - `Display` text is user-facing and stable.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ContactResult<T> = Result<T, ContactError>;

/// Failure outcomes of contact operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// Name is blank.
    EmptyName,
    /// Phone fails the charset or digit-count check.
    InvalidPhone,
    /// Email fails the shape check.
    InvalidEmail,
    /// Another contact already uses this email, ignoring case.
    DuplicateEmail(String),
    /// No contact has this email.
    NotFound(String),
    /// Interactive search was submitted without a term.
    EmptyQuery,
    /// Interactive delete was submitted without an email.
    EmptyEmailInput,
    /// Stored email has no `@`; only reachable for hand-edited data files.
    MalformedEmail(String),
}

impl Display for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::InvalidPhone => write!(f, "Invalid phone number format"),
            Self::InvalidEmail => write!(f, "Invalid email format"),
            Self::DuplicateEmail(_) => write!(f, "Contact with this email already exists"),
            Self::NotFound(_) => write!(f, "Contact not found"),
            Self::EmptyQuery => write!(f, "Please enter a search term"),
            Self::EmptyEmailInput => write!(f, "Please enter an email."),
            Self::MalformedEmail(email) => write!(f, "Malformed email `{email}`: missing `@`"),
        }
    }
}

impl Error for ContactError {}

impl ContactError {
    /// Stable machine-readable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::InvalidPhone => "invalid_phone",
            Self::InvalidEmail => "invalid_email",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::NotFound(_) => "not_found",
            Self::EmptyQuery => "empty_query",
            Self::EmptyEmailInput => "empty_email_input",
            Self::MalformedEmail(_) => "malformed_email",
        }
    }
}
