use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::test_support::Harness;
use crate::util::storage::MemoryStorage;
use futures::executor::block_on;

fn profile(value: serde_json::Value) -> Profile {
    serde_json::from_value(value).unwrap()
}

fn store(storage: &MemoryStorage) -> SessionStore {
    SessionStore::load(Rc::new(storage.clone()))
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn load_from_empty_storage_is_signed_out() {
    let session = store(&MemoryStorage::new()).snapshot();
    assert_eq!(session, Session::default());
    assert!(!session.is_authenticated());
    assert_eq!(session.role, Role::User);
}

#[test]
fn load_reads_persisted_fields() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "tok");
    storage.set_item(ROLE_KEY, "admin");
    storage.set_item(PROFILE_KEY, r#"{"username":"ada"}"#);

    let session = store(&storage).snapshot();

    assert_eq!(session.token, "tok");
    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.profile.unwrap().username.as_deref(), Some("ada"));
}

#[test]
fn load_discards_corrupt_profile() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "tok");
    storage.set_item(PROFILE_KEY, "{not json");

    let s = store(&storage);

    assert_eq!(s.token(), "tok");
    assert!(!s.has_profile());
}

// =============================================================
// set_auth
// =============================================================

#[test]
fn set_auth_takes_role_from_user_info() {
    let storage = MemoryStorage::new();
    let s = store(&storage);

    s.set_auth("tok-1", profile(serde_json::json!({ "username": "ada", "role": "admin" })));

    assert_eq!(s.token(), "tok-1");
    assert_eq!(s.role(), Role::Admin);
    assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("tok-1"));
    assert_eq!(storage.get_item(ROLE_KEY).as_deref(), Some("admin"));
    let stored: Profile = serde_json::from_str(&storage.get_item(PROFILE_KEY).unwrap()).unwrap();
    assert_eq!(stored.username.as_deref(), Some("ada"));
}

#[test]
fn set_auth_keeps_prior_role_when_absent() {
    let storage = MemoryStorage::new();
    storage.set_item(ROLE_KEY, "admin");
    let s = store(&storage);

    s.set_auth("tok-2", Profile::default());

    assert_eq!(s.token(), "tok-2");
    assert_eq!(s.role(), Role::Admin);
}

#[test]
fn set_auth_defaults_role_to_user() {
    let s = store(&MemoryStorage::new());
    s.set_auth("tok-3", profile(serde_json::json!({ "username": "bob" })));
    assert_eq!(s.role(), Role::User);
}

#[test]
fn set_auth_merges_into_existing_profile() {
    let storage = MemoryStorage::new();
    storage.set_item(PROFILE_KEY, r#"{"username":"ada","email":"old@example.test"}"#);
    let s = store(&storage);

    s.set_auth("tok", profile(serde_json::json!({ "email": "new@example.test" })));

    let p = s.profile().unwrap();
    assert_eq!(p.username.as_deref(), Some("ada"));
    assert_eq!(p.email.as_deref(), Some("new@example.test"));
}

// =============================================================
// set_profile
// =============================================================

#[test]
fn set_profile_updates_role_only_when_named() {
    let storage = MemoryStorage::new();
    let s = store(&storage);
    s.set_auth("tok", profile(serde_json::json!({ "role": "admin" })));

    s.set_profile(profile(serde_json::json!({ "phone": "555-0100" })));
    assert_eq!(s.role(), Role::Admin);

    s.set_profile(profile(serde_json::json!({ "role": "user" })));
    assert_eq!(s.role(), Role::User);
    assert_eq!(storage.get_item(ROLE_KEY).as_deref(), Some("user"));
    assert_eq!(s.profile().unwrap().phone.as_deref(), Some("555-0100"));
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_memory_and_storage() {
    let storage = MemoryStorage::new();
    let s = store(&storage);
    s.set_auth("tok", profile(serde_json::json!({ "username": "ada", "role": "admin" })));

    s.logout();

    assert_eq!(s.snapshot(), Session { token: String::new(), role: Role::User, profile: None });
    assert!(storage.is_empty());
}

#[test]
fn logout_is_idempotent() {
    let storage = MemoryStorage::new();
    let s = store(&storage);
    s.set_auth("tok", Profile::default());

    s.logout();
    let once = s.snapshot();
    s.logout();

    assert_eq!(s.snapshot(), once);
    assert!(storage.is_empty());
}

#[test]
fn storage_mirrors_memory_after_each_mutation() {
    let storage = MemoryStorage::new();
    let s = store(&storage);

    s.set_auth("tok", profile(serde_json::json!({ "username": "ada" })));
    assert_eq!(Session::load(&storage), s.snapshot());

    s.set_profile(profile(serde_json::json!({ "role": "admin" })));
    assert_eq!(Session::load(&storage), s.snapshot());

    s.logout();
    assert_eq!(Session::load(&storage), s.snapshot());
}

#[test]
fn subscriber_sees_every_mutation() {
    let s = store(&MemoryStorage::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    s.subscribe(move |session| sink.borrow_mut().push(session.is_authenticated()));

    s.set_auth("tok", Profile::default());
    s.logout();

    assert_eq!(*seen.borrow(), vec![true, false]);
}

// =============================================================
// fetch_profile
// =============================================================

#[test]
fn fetch_profile_without_token_skips_network() {
    let h = Harness::new(MemoryStorage::new());

    let result = block_on(h.session.fetch_profile(&h.client));

    assert_eq!(result, Ok(None));
    assert_eq!(h.transport.request_count(), 0);
}

#[test]
fn fetch_profile_merges_remote_record() {
    let h = Harness::new(MemoryStorage::new());
    h.session.set_auth("tok", Profile::default());
    h.transport.respond(200, serde_json::json!({ "username": "ada", "role": "admin" }));

    let fetched = block_on(h.session.fetch_profile(&h.client)).unwrap().unwrap();

    assert_eq!(fetched.username.as_deref(), Some("ada"));
    assert_eq!(h.session.role(), Role::Admin);
    assert_eq!(h.session.profile().unwrap().username.as_deref(), Some("ada"));
    assert_eq!(h.transport.request_count(), 1);
}

#[test]
fn fetch_profile_propagates_failure() {
    let h = Harness::new(MemoryStorage::new());
    h.session.set_auth("tok", Profile::default());
    h.transport.respond(500, serde_json::json!({ "error": "database down" }));

    let err = block_on(h.session.fetch_profile(&h.client)).unwrap_err();

    assert_eq!(err.to_string(), "database down");
    assert_eq!(h.session.token(), "tok");
}
