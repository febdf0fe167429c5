//! Static route table.
//!
//! Each entry names the page it renders, the layout around it and the access
//! rule the guard enforces. Redirect entries are resolved before the guard
//! runs; anything unknown lands on the login page.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::net::types::Role;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const ADMIN_HOME_PATH: &str = "/admin/dashboard";
pub const USER_HOME_PATH: &str = "/user/home";

/// Paths reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH, REGISTER_PATH];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Blank,
    Admin,
    User,
}

/// Page rendered once the guard allows the route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Register,
    Dashboard,
    Books,
    BorrowRecords,
    Users,
    UserHome,
    UserLibrary,
    UserBorrow,
    UserProfile,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_admin: bool,
    pub requires_user: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub view: ViewKind,
    pub layout: Layout,
    pub meta: RouteMeta,
}

const fn blank(path: &'static str, view: ViewKind) -> RouteDef {
    RouteDef { path, view, layout: Layout::Blank, meta: RouteMeta { requires_admin: false, requires_user: false } }
}

const fn admin(path: &'static str, view: ViewKind) -> RouteDef {
    RouteDef { path, view, layout: Layout::Admin, meta: RouteMeta { requires_admin: true, requires_user: false } }
}

const fn reader(path: &'static str, view: ViewKind) -> RouteDef {
    RouteDef { path, view, layout: Layout::User, meta: RouteMeta { requires_admin: false, requires_user: true } }
}

pub const ROUTES: &[RouteDef] = &[
    blank(LOGIN_PATH, ViewKind::Login),
    blank(REGISTER_PATH, ViewKind::Register),
    admin(ADMIN_HOME_PATH, ViewKind::Dashboard),
    admin("/admin/books", ViewKind::Books),
    admin("/admin/borrow", ViewKind::BorrowRecords),
    admin("/admin/users", ViewKind::Users),
    reader(USER_HOME_PATH, ViewKind::UserHome),
    reader("/user/library", ViewKind::UserLibrary),
    reader("/user/borrow", ViewKind::UserBorrow),
    reader("/user/profile", ViewKind::UserProfile),
];

/// `(from, to)` pairs applied before route lookup.
pub const REDIRECTS: &[(&str, &str)] = &[("/", LOGIN_PATH), ("/admin", ADMIN_HOME_PATH), ("/user", USER_HOME_PATH)];

/// Strip query, fragment and trailing slashes.
pub fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Exact route lookup; redirects are not followed.
pub fn find(path: &str) -> Option<&'static RouteDef> {
    let path = normalize(path);
    ROUTES.iter().find(|r| r.path == path)
}

/// Resolve a requested path to the route that will render.
pub fn resolve(path: &str) -> &'static RouteDef {
    let path = normalize(path);
    let target = REDIRECTS.iter().find(|(from, _)| *from == path).map_or(path, |(_, to)| *to);
    find(target).unwrap_or(&ROUTES[0])
}

pub fn is_public(path: &str) -> bool {
    let path = normalize(path);
    PUBLIC_PATHS.iter().any(|p| *p == path)
}

/// Where a freshly signed-in user should land.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_HOME_PATH,
        Role::User => USER_HOME_PATH,
    }
}
