use super::*;
use crate::router::routes::{Layout, find};

#[test]
fn admin_nav_targets_admin_routes() {
    for (path, _) in ADMIN_NAV {
        assert_eq!(find(path).map(|r| r.layout), Some(Layout::Admin), "{path}");
    }
}

#[test]
fn user_nav_targets_user_routes() {
    for (path, _) in USER_NAV {
        assert_eq!(find(path).map(|r| r.layout), Some(Layout::User), "{path}");
    }
}

#[test]
fn nav_class_marks_active_link() {
    assert_eq!(nav_class("nav", "/admin/books", "/admin/books"), "nav nav--active");
    assert_eq!(nav_class("nav", "/admin/users", "/admin/books"), "nav");
}
