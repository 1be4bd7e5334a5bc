//! Field validators for contact input.
//!
//! # Invariants
//! - Validators are pure and never touch storage or network.
//! - Input is checked as given; callers trim user input beforehand.

use crate::error::{ContactError, ContactResult};
use crate::model::contact::NewContact;
use once_cell::sync::Lazy;
use regex::Regex;

const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});
static PHONE_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-()+]+$").expect("valid phone regex"));

/// Returns whether `email` has a `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns whether `phone` uses only digits, whitespace, `-`, `(`, `)`, `+`
/// and carries at least ten digits.
pub fn validate_phone(phone: &str) -> bool {
    PHONE_CHARSET_RE.is_match(phone)
        && phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

impl NewContact {
    /// Checks name, phone and email in that order.
    ///
    /// # Errors
    /// - `EmptyName` when the name is blank.
    /// - `InvalidPhone` / `InvalidEmail` when the validators reject the value.
    pub fn validate(&self) -> ContactResult<()> {
        if self.name.trim().is_empty() {
            return Err(ContactError::EmptyName);
        }
        if !validate_phone(&self.phone) {
            return Err(ContactError::InvalidPhone);
        }
        if !validate_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}
