//! Contact record store.
//!
//! # Responsibility
//! - Admit validated contacts and enforce email uniqueness.
//! - Serve search, lookup, sorted listing and delete use-cases.
//! - Persist the whole collection after every successful mutation.
//!
//! # Invariants
//! - No two live contacts share an email, ignoring case.
//! - Contacts keep insertion order; sorting happens on read.
//! - A failed save never rolls back the in-memory mutation.

use crate::error::{ContactError, ContactResult};
use crate::model::contact::{Contact, CreatedAt, NewContact};
use crate::repo::contact_repo::{ContactRepository, PersistError};
use crate::service::stats::{domain_histogram, DomainCount, TOP_DOMAIN_LIMIT};
use log::{debug, error, info};

/// Summary rendered by the statistics command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactStatistics {
    pub total: usize,
    /// At most five domains, highest count first.
    pub top_domains: Vec<DomainCount>,
}

/// Authoritative in-memory contact collection bound to a repository.
pub struct ContactStore<R: ContactRepository> {
    repo: R,
    contacts: Vec<Contact>,
    last_persist_error: Option<PersistError>,
}

impl<R: ContactRepository> ContactStore<R> {
    /// Loads the stored collection once and takes ownership of it.
    pub fn open(repo: R) -> Self {
        let contacts = repo.load();
        info!(
            "event=store_open module=service status=ok count={}",
            contacts.len()
        );
        Self {
            repo,
            contacts,
            last_persist_error: None,
        }
    }

    /// Validates and appends a new contact, then saves.
    ///
    /// # Errors
    /// - Validation errors from [`NewContact::validate`].
    /// - `DuplicateEmail` when the email is already used, ignoring case.
    pub fn add(&mut self, draft: NewContact) -> ContactResult<&Contact> {
        if let Err(err) = self.admit(&draft) {
            info!(
                "event=contact_add module=service status=rejected error_code={}",
                err.code()
            );
            return Err(err);
        }

        self.contacts.push(Contact::from_draft(draft, CreatedAt::now()));
        self.persist("contact_add");
        info!(
            "event=contact_add module=service status=ok count={}",
            self.contacts.len()
        );

        let index = self.contacts.len() - 1;
        Ok(&self.contacts[index])
    }

    /// Case-insensitive substring search over name, email and notes, plus a
    /// substring match on phone. Results keep store order.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let needle = query.to_lowercase();
        let hits: Vec<&Contact> = self
            .contacts
            .iter()
            .filter(|contact| {
                contact.name.to_lowercase().contains(&needle)
                    || contact.phone.contains(&needle)
                    || contact.email.to_lowercase().contains(&needle)
                    || contact.notes.to_lowercase().contains(&needle)
            })
            .collect();
        debug!(
            "event=contact_search module=service status=ok hits={}",
            hits.len()
        );
        hits
    }

    /// First contact whose email equals `email`, ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.has_email(email))
    }

    /// Removes the first contact matching `email` and returns its name.
    ///
    /// # Errors
    /// - `NotFound` when no contact uses the email.
    pub fn delete(&mut self, email: &str) -> ContactResult<String> {
        let Some(index) = self
            .contacts
            .iter()
            .position(|contact| contact.has_email(email))
        else {
            info!("event=contact_delete module=service status=rejected error_code=not_found");
            return Err(ContactError::NotFound(email.to_string()));
        };

        let removed = self.contacts.remove(index);
        self.persist("contact_delete");
        info!(
            "event=contact_delete module=service status=ok count={}",
            self.contacts.len()
        );
        Ok(removed.name)
    }

    /// All contacts ordered by lower-cased name; equal names keep insertion order.
    pub fn all_sorted(&self) -> Vec<&Contact> {
        let mut sorted: Vec<&Contact> = self.contacts.iter().collect();
        sorted.sort_by_cached_key(|contact| contact.name.to_lowercase());
        sorted
    }

    /// Total count and the top email domains over the sorted listing.
    ///
    /// # Errors
    /// - `MalformedEmail` when a stored email has no `@`.
    pub fn statistics(&self) -> ContactResult<ContactStatistics> {
        let sorted = self.all_sorted();
        let histogram = domain_histogram(sorted.iter().copied())?;
        Ok(ContactStatistics {
            total: sorted.len(),
            top_domains: histogram.top(TOP_DOMAIN_LIMIT),
        })
    }

    /// Contacts in insertion order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Error of the most recent save, cleared by the next successful one.
    pub fn last_persist_error(&self) -> Option<&PersistError> {
        self.last_persist_error.as_ref()
    }

    /// Takes the error of the most recent save, leaving `None` behind.
    pub fn take_persist_error(&mut self) -> Option<PersistError> {
        self.last_persist_error.take()
    }

    /// Backing repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn admit(&self, draft: &NewContact) -> ContactResult<()> {
        draft.validate()?;
        if self.find_by_email(&draft.email).is_some() {
            return Err(ContactError::DuplicateEmail(draft.email.clone()));
        }
        Ok(())
    }

    fn persist(&mut self, trigger: &str) {
        match self.repo.save(&self.contacts) {
            Ok(()) => self.last_persist_error = None,
            Err(err) => {
                error!(
                    "event=contacts_save module=service status=error trigger={} error_code=save_failed error={}",
                    trigger, err
                );
                self.last_persist_error = Some(err);
            }
        }
    }
}
