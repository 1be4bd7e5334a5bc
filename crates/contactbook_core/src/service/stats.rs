//! Email domain statistics.
//!
//! # Invariants
//! - Domains are lower-cased before counting.
//! - Ties in `top` keep first-encountered order.

use crate::error::{ContactError, ContactResult};
use crate::model::contact::Contact;
use std::collections::HashMap;

/// Number of domains reported by the statistics command.
pub const TOP_DOMAIN_LIMIT: usize = 5;

/// One histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
}

/// Contact counts per email domain, in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainHistogram {
    entries: Vec<DomainCount>,
}

impl DomainHistogram {
    /// Count for `domain`, compared lower-cased.
    pub fn get(&self, domain: &str) -> Option<usize> {
        let domain = domain.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.domain == domain)
            .map(|entry| entry.count)
    }

    /// Buckets in first-encountered order.
    pub fn entries(&self) -> &[DomainCount] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `limit` buckets, highest count first.
    pub fn top(&self, limit: usize) -> Vec<DomainCount> {
        let mut ranked = self.entries.clone();
        // stable: equal counts stay in encounter order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }
}

/// Counts contacts per lower-cased email domain.
///
/// # Errors
/// - `MalformedEmail` when an email has no `@`.
pub fn domain_histogram<'a, I>(contacts: I) -> ContactResult<DomainHistogram>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let mut entries: Vec<DomainCount> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for contact in contacts {
        let domain = contact
            .email_domain()
            .ok_or_else(|| ContactError::MalformedEmail(contact.email.clone()))?;
        match slots.get(&domain).copied() {
            Some(slot) => entries[slot].count += 1,
            None => {
                slots.insert(domain.clone(), entries.len());
                entries.push(DomainCount { domain, count: 1 });
            }
        }
    }

    Ok(DomainHistogram { entries })
}

#[cfg(test)]
mod tests {
    use super::domain_histogram;
    use crate::error::ContactError;
    use crate::model::contact::{Contact, CreatedAt, NewContact};

    fn contact(email: &str) -> Contact {
        Contact::from_draft(
            NewContact::new("n", "5551234567", email),
            CreatedAt::now(),
        )
    }

    #[test]
    fn counts_domains_case_insensitively() {
        let contacts = vec![contact("a@x.com"), contact("b@X.COM"), contact("c@y.com")];
        let histogram = domain_histogram(&contacts).expect("histogram");
        assert_eq!(histogram.get("x.com"), Some(2));
        assert_eq!(histogram.get("y.com"), Some(1));
        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram.top(1)[0].domain, "x.com");
    }

    #[test]
    fn top_breaks_ties_by_first_encounter_and_caps() {
        let emails = ["a@f.io", "a@e.io", "a@d.io", "b@d.io", "a@c.io", "a@b.io", "a@a.io"];
        let contacts: Vec<Contact> = emails.iter().map(|email| contact(email)).collect();
        let top = domain_histogram(&contacts).expect("histogram").top(5);
        let domains: Vec<&str> = top.iter().map(|entry| entry.domain.as_str()).collect();
        assert_eq!(domains, vec!["d.io", "f.io", "e.io", "c.io", "b.io"]);
    }

    #[test]
    fn missing_at_sign_is_reported() {
        let contacts = vec![contact("a@x.com"), contact("nope")];
        let err = domain_histogram(&contacts).expect_err("malformed email");
        assert_eq!(err, ContactError::MalformedEmail("nope".to_string()));
    }

    #[test]
    fn empty_input_yields_empty_histogram() {
        let histogram = domain_histogram(&Vec::<Contact>::new()).expect("histogram");
        assert!(histogram.is_empty());
        assert!(histogram.top(5).is_empty());
    }
}
