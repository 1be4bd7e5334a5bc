use contactbook_core::{
    Contact, ContactError, ContactRepository, ContactStore, JsonFileContactRepository,
    NewContact, PersistError, PersistResult,
};
use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;

#[derive(Default)]
struct MemoryRepo {
    seed: Vec<Contact>,
    saved: RefCell<Vec<Vec<Contact>>>,
    fail_saves: Cell<bool>,
}

impl ContactRepository for &MemoryRepo {
    fn load(&self) -> Vec<Contact> {
        self.seed.clone()
    }

    fn save(&self, contacts: &[Contact]) -> PersistResult<()> {
        if self.fail_saves.get() {
            return Err(PersistError::Io {
                path: PathBuf::from("/readonly/contacts.json"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.saved.borrow_mut().push(contacts.to_vec());
        Ok(())
    }
}

fn alice() -> NewContact {
    NewContact::new("Alice Smith", "555-123-4567", "alice@x.com").with_notes("met at PyCon")
}

fn bob() -> NewContact {
    NewContact::new("Bob", "(555) 987 6543", "bob@y.com")
}

#[test]
fn add_succeeds_once_and_rejects_duplicate_email_in_any_case() {
    let repo = MemoryRepo::default();
    let mut store = ContactStore::open(&repo);

    let added = store.add(alice()).unwrap();
    assert_eq!(added.name, "Alice Smith");
    assert_eq!(store.len(), 1);

    let mut dup = bob();
    dup.email = "ALICE@X.COM".to_string();
    let err = store.add(dup).unwrap_err();
    assert!(matches!(err, ContactError::DuplicateEmail(_)));
    assert_eq!(store.len(), 1);
    assert_eq!(repo.saved.borrow().len(), 1);
}

#[test]
fn add_rejects_invalid_fields_without_saving() {
    let repo = MemoryRepo::default();
    let mut store = ContactStore::open(&repo);

    let cases = [
        (NewContact::new(" ", "555-123-4567", "a@b.co"), ContactError::EmptyName),
        (NewContact::new("A", "555-1234", "a@b.co"), ContactError::InvalidPhone),
        (NewContact::new("A", "555-123-4567", "not-an-email"), ContactError::InvalidEmail),
    ];
    for (draft, expected) in cases {
        assert_eq!(store.add(draft).unwrap_err(), expected);
    }

    assert!(store.is_empty());
    assert!(repo.saved.borrow().is_empty());
}

#[test]
fn search_matches_name_email_notes_and_phone() {
    let repo = MemoryRepo::default();
    let mut store = ContactStore::open(&repo);
    store.add(alice()).unwrap();
    store.add(bob()).unwrap();

    let hits = store.search("alice");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].email, "alice@x.com");

    assert_eq!(store.search("PYCON").len(), 1);
    assert_eq!(store.search("Y.COM")[0].name, "Bob");
    assert_eq!(store.search("987")[0].name, "Bob");
    assert_eq!(store.search("555").len(), 2);
    assert!(store.search("zzz").is_empty());
}

#[test]
fn search_keeps_store_order() {
    let repo = MemoryRepo::default();
    let mut store = ContactStore::open(&repo);
    store.add(NewContact::new("Zed", "5550000001", "z@x.com")).unwrap();
    store.add(NewContact::new("Amy", "5550000002", "a@x.com")).unwrap();

    let names: Vec<&str> = store.search("x.com").iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Zed", "Amy"]);
}

#[test]
fn find_by_email_ignores_case() {
    let repo = MemoryRepo::default();
    let mut store = ContactStore::open(&repo);
    store.add(alice()).unwrap();

    assert_eq!(store.find_by_email("Alice@X.com").unwrap().name, "Alice Smith");
    assert!(store.find_by_email("carol@x.com").is_none());
}

#[test]
fn delete_is_case_insensitive_and_reports_not_found_afterwards() {
    let repo = MemoryRepo::default();
    let mut store = ContactStore::open(&repo);
    store.add(alice()).unwrap();
    store.add(bob()).unwrap();

    assert_eq!(store.delete("ALICE@X.COM").unwrap(), "Alice Smith");
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.delete("alice@x.com").unwrap_err(),
        ContactError::NotFound("alice@x.com".to_string())
    );

    let saves = repo.saved.borrow();
    assert_eq!(saves.len(), 3);
    assert_eq!(saves[2].len(), 1);
    assert_eq!(saves[2][0].name, "Bob");
}

#[test]
fn all_sorted_orders_names_case_insensitively() {
    let repo = MemoryRepo::default();
    let mut store = ContactStore::open(&repo);
    store.add(NewContact::new("Zoe", "5550000001", "zoe@x.com")).unwrap();
    store.add(NewContact::new("adam", "5550000002", "adam@x.com")).unwrap();
    store.add(NewContact::new("Bob", "5550000003", "bob@x.com")).unwrap();
    store.add(NewContact::new("bob", "5550000004", "bob2@x.com")).unwrap();

    let names: Vec<&str> = store.all_sorted().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["adam", "Bob", "bob", "Zoe"]);

    let inserted: Vec<&str> = store.contacts().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(inserted, vec!["Zoe", "adam", "Bob", "bob"]);
}

#[test]
fn statistics_report_total_and_top_domain() {
    let repo = MemoryRepo::default();
    let mut store = ContactStore::open(&repo);
    store.add(NewContact::new("A", "5550000001", "a@x.com")).unwrap();
    store.add(NewContact::new("B", "5550000002", "b@X.com")).unwrap();
    store.add(NewContact::new("C", "5550000003", "c@y.com")).unwrap();

    let stats = store.statistics().unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.top_domains[0].domain, "x.com");
    assert_eq!(stats.top_domains[0].count, 2);
    assert_eq!(stats.top_domains[1].domain, "y.com");
}

#[test]
fn statistics_surface_malformed_stored_email() {
    let mut seed: Vec<Contact> = serde_json::from_str(
        r#"[{"name":"Hand Edited","phone":"5551234567","email":"no-at-sign"}]"#,
    )
    .unwrap();
    seed[0].notes = "edited by hand".to_string();
    let repo = MemoryRepo {
        seed,
        ..MemoryRepo::default()
    };
    let store = ContactStore::open(&repo);

    assert!(matches!(
        store.statistics().unwrap_err(),
        ContactError::MalformedEmail(email) if email == "no-at-sign"
    ));
}

#[test]
fn failed_save_keeps_memory_authoritative_until_next_success() {
    let repo = MemoryRepo::default();
    repo.fail_saves.set(true);
    let mut store = ContactStore::open(&repo);

    store.add(alice()).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.last_persist_error().is_some());
    assert!(matches!(store.take_persist_error(), Some(PersistError::Io { .. })));
    assert!(store.take_persist_error().is_none());

    repo.fail_saves.set(false);
    store.add(bob()).unwrap();
    assert!(store.last_persist_error().is_none());
    assert_eq!(repo.saved.borrow()[0].len(), 2);
}

#[test]
fn store_reopens_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    {
        let mut store = ContactStore::open(JsonFileContactRepository::new(&path));
        store.add(alice()).unwrap();
        store.add(bob()).unwrap();
        store.delete("bob@y.com").unwrap();
    }

    let store = ContactStore::open(JsonFileContactRepository::new(&path));
    assert_eq!(store.len(), 1);
    assert_eq!(store.contacts()[0].notes, "met at PyCon");
    assert_eq!(store.repository().path(), path.as_path());
}
