//! Contact domain record.
//!
//! # Responsibility
//! - Define the persisted contact shape and its creation draft.
//! - Own the `YYYY-MM-DD HH:MM:SS` timestamp encoding.
//!
//! # Invariants
//! - Missing or null `notes` decode as an empty string.
//! - Missing or null `created_at` decodes as the load time.
//! - A `created_at` in any other layout is kept verbatim, never rewritten.
//! - Unknown fields in persisted records are ignored.

use chrono::{Local, NaiveDateTime, Timelike};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Persisted timestamp layout for `created_at`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Creation timestamp in local time with whole-second precision.
///
/// Stored values that do not match [`CREATED_AT_FORMAT`] are kept verbatim
/// so a later save writes back exactly what was loaded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CreatedAt {
    Parsed(NaiveDateTime),
    Raw(String),
}

impl CreatedAt {
    /// Captures the current local time, truncated to seconds.
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Self::Parsed(now.with_nanosecond(0).unwrap_or(now))
    }

    /// Parses a `YYYY-MM-DD HH:MM:SS` string.
    pub fn parse(value: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(value.trim(), CREATED_AT_FORMAT)
            .ok()
            .map(Self::Parsed)
    }

    /// Parses `value`, falling back to keeping it as-is.
    pub fn parse_or_raw(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| Self::Raw(value.to_string()))
    }

    /// Underlying naive local datetime; `None` for verbatim values.
    pub fn as_naive(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Parsed(value) => Some(*value),
            Self::Raw(_) => None,
        }
    }
}

impl From<NaiveDateTime> for CreatedAt {
    fn from(value: NaiveDateTime) -> Self {
        Self::Parsed(value.with_nanosecond(0).unwrap_or(value))
    }
}

impl Display for CreatedAt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parsed(value) => write!(f, "{}", value.format(CREATED_AT_FORMAT)),
            Self::Raw(value) => f.write_str(value),
        }
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CreatedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => {
                let created_at = Self::parse_or_raw(&value);
                if matches!(created_at, Self::Raw(_)) {
                    warn!("event=contact_decode module=model status=kept_raw field=created_at");
                }
                Ok(created_at)
            }
            None => Ok(Self::now()),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name, never blank for admitted records.
    pub name: String,
    /// Phone text as entered by the user.
    pub phone: String,
    /// Email as entered; unique across the store ignoring case.
    pub email: String,
    /// Free-form notes, possibly empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    /// Creation time, immutable after creation.
    #[serde(default = "CreatedAt::now")]
    pub created_at: CreatedAt,
}

impl Contact {
    /// Builds a record from a draft with an explicit creation time.
    ///
    /// Does not validate; callers admit drafts through the store.
    pub fn from_draft(draft: NewContact, created_at: CreatedAt) -> Self {
        Self {
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            notes: draft.notes,
            created_at,
        }
    }

    /// Lower-cased email used for uniqueness checks and lookups.
    pub fn email_key(&self) -> String {
        self.email.to_lowercase()
    }

    /// Returns whether `email` names this contact, ignoring case.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    /// Lower-cased part of the email after `@`, or `None` when `@` is absent.
    pub fn email_domain(&self) -> Option<String> {
        self.email.split('@').nth(1).map(str::to_lowercase)
    }
}

/// Input for creating a new contact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl NewContact {
    /// Creates a draft with empty notes.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            notes: String::new(),
        }
    }

    /// Sets the notes field.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
