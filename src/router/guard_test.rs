use super::*;
use crate::router::routes::{PUBLIC_PATHS, ROUTES, find, resolve};
use crate::state::session::{PROFILE_KEY, ROLE_KEY, TOKEN_KEY};
use crate::test_support::Harness;
use crate::util::storage::{KeyValueStore, MemoryStorage};
use futures::executor::block_on;

fn services(h: &Harness) -> AppServices {
    AppServices { client: h.client.clone(), session: h.session.clone(), notifier: h.notifier.clone() }
}

fn storage_with(role: &str, with_profile: bool) -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "tok");
    storage.set_item(ROLE_KEY, role);
    if with_profile {
        storage.set_item(PROFILE_KEY, &format!(r#"{{"username":"ada","role":"{role}"}}"#));
    }
    storage
}

fn check(h: &Harness, path: &str) -> NavigationDecision {
    block_on(evaluate(resolve(path), &services(h)))
}

// =============================================================
// Public routes
// =============================================================

#[test]
fn login_with_token_clears_session_and_allows() {
    let h = Harness::new(storage_with("admin", true));

    assert_eq!(check(&h, "/login"), NavigationDecision::Allow);

    assert_eq!(h.session.token(), "");
    assert!(!h.session.has_profile());
    assert!(h.storage.is_empty());
    assert_eq!(h.transport.request_count(), 0);
}

#[test]
fn public_routes_allowed_without_token() {
    let h = Harness::new(MemoryStorage::new());
    for path in PUBLIC_PATHS {
        assert_eq!(check(&h, path), NavigationDecision::Allow);
    }
    assert_eq!(h.transport.request_count(), 0);
}

// =============================================================
// Missing token
// =============================================================

#[test]
fn protected_routes_without_token_redirect_to_login() {
    let h = Harness::new(MemoryStorage::new());
    for route in ROUTES.iter().filter(|r| !PUBLIC_PATHS.contains(&r.path)) {
        assert_eq!(block_on(evaluate(route, &services(&h))), NavigationDecision::RedirectLogin, "{}", route.path);
    }
    assert_eq!(h.transport.request_count(), 0);
}

#[test]
fn guard_checks_persisted_token_not_memory() {
    let h = Harness::new(storage_with("user", true));
    h.storage.remove_item(TOKEN_KEY);

    assert_eq!(check(&h, "/user/home"), NavigationDecision::RedirectLogin);
}

// =============================================================
// Profile loading
// =============================================================

#[test]
fn missing_profile_is_fetched_before_role_check() {
    let h = Harness::new(storage_with("user", false));
    h.transport.respond(200, serde_json::json!({ "username": "root", "role": "admin" }));

    assert_eq!(check(&h, "/admin/books"), NavigationDecision::Allow);
    assert_eq!(h.transport.request_count(), 1);
    assert_eq!(h.session.role(), Role::Admin);
}

#[test]
fn loosely_typed_profile_keeps_session() {
    let h = Harness::new(storage_with("user", false));
    h.transport.respond(
        200,
        serde_json::json!({ "id": 7, "username": 12345, "role": "user", "phone": 13800000000_u64 }),
    );

    assert_eq!(check(&h, "/user/home"), NavigationDecision::Allow);

    assert_eq!(h.session.token(), "tok");
    assert_eq!(h.storage.get_item(TOKEN_KEY).as_deref(), Some("tok"));
    assert_eq!(h.session.profile().and_then(|p| p.phone).as_deref(), Some("13800000000"));
    assert!(h.errors().is_empty());
}

#[test]
fn loaded_profile_is_not_refetched() {
    let h = Harness::new(storage_with("user", true));

    assert_eq!(check(&h, "/user/library"), NavigationDecision::Allow);
    assert_eq!(h.transport.request_count(), 0);
}

#[test]
fn profile_fetch_failure_ends_session() {
    let h = Harness::new(storage_with("user", false));
    h.transport.respond(500, serde_json::json!({ "error": "database down" }));

    assert_eq!(check(&h, "/user/home"), NavigationDecision::RedirectLogin);

    assert_eq!(h.session.token(), "");
    assert!(h.storage.is_empty());
    assert_eq!(h.errors(), vec!["database down".to_owned(), SESSION_EXPIRED_MESSAGE.to_owned()]);
    assert_eq!(h.transport.request_count(), 1);
}

#[test]
fn profile_fetch_unauthorized_ends_session_without_generic_toast() {
    let h = Harness::new(storage_with("admin", false));
    h.transport.respond(401, serde_json::json!({ "error": "expired" }));

    assert_eq!(check(&h, "/admin/dashboard"), NavigationDecision::RedirectLogin);

    assert_eq!(h.logout_count(), 1);
    assert_eq!(h.visits(), vec!["/login".to_owned()]);
    assert_eq!(h.errors(), vec![SESSION_EXPIRED_MESSAGE.to_owned()]);
}

// =============================================================
// Role rules
// =============================================================

#[test]
fn reader_on_admin_route_goes_to_user_home() {
    let h = Harness::new(storage_with("user", true));
    let decision = check(&h, "/admin/users");
    assert_eq!(decision, NavigationDecision::RedirectUserHome);
    assert_eq!(decision.redirect_path(), Some("/user/home"));
}

#[test]
fn admin_on_reader_route_goes_to_dashboard() {
    let h = Harness::new(storage_with("admin", true));
    let decision = check(&h, "/user/profile");
    assert_eq!(decision, NavigationDecision::RedirectAdminDashboard);
    assert_eq!(decision.redirect_path(), Some("/admin/dashboard"));
}

#[test]
fn matching_roles_are_allowed() {
    let admin = Harness::new(storage_with("admin", true));
    assert_eq!(check(&admin, "/admin"), NavigationDecision::Allow);

    let reader = Harness::new(storage_with("user", true));
    assert_eq!(check(&reader, "/user"), NavigationDecision::Allow);
}

#[test]
fn authorize_without_restrictions_allows_any_role() {
    let meta = find("/login").unwrap().meta;
    assert_eq!(authorize(meta, Role::Admin), NavigationDecision::Allow);
    assert_eq!(authorize(meta, Role::User), NavigationDecision::Allow);
}

#[test]
fn allow_has_no_redirect_path() {
    assert_eq!(NavigationDecision::Allow.redirect_path(), None);
    assert_eq!(NavigationDecision::RedirectLogin.redirect_path(), Some("/login"));
}
