//! Console chrome for the admin and reader areas.
//!
//! SYSTEM CONTEXT
//! ==============
//! Layouts own navigation between sibling routes and the logout action; the
//! page inside them stays unaware of which console it lives in.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::use_services;
use crate::router::routes::LOGIN_PATH;
use crate::state::session::Session;

/// `(path, label)` entries for the admin sidebar.
pub const ADMIN_NAV: &[(&str, &str)] = &[
    ("/admin/dashboard", "Dashboard"),
    ("/admin/books", "Books"),
    ("/admin/borrow", "Borrow records"),
    ("/admin/users", "Users"),
];

/// `(path, label)` entries for the reader top bar.
pub const USER_NAV: &[(&str, &str)] = &[
    ("/user/home", "Home"),
    ("/user/library", "Library"),
    ("/user/borrow", "My borrowing"),
    ("/user/profile", "Profile"),
];

/// CSS class for a nav link, marking the active route.
pub fn nav_class(base: &str, current: &str, target: &str) -> String {
    if current == target { format!("{base} {base}--active") } else { base.to_owned() }
}

fn nav_links(items: &'static [(&'static str, &'static str)], base: &'static str) -> impl IntoView {
    let location = use_location();
    items
        .iter()
        .map(|(path, label)| {
            let class = move || nav_class(base, &location.pathname.get(), path);
            view! { <A href=*path attr:class=class>{*label}</A> }
        })
        .collect::<Vec<_>>()
}

#[component]
fn LogoutButton() -> impl IntoView {
    let services = use_services();
    let navigate = use_navigate();
    let on_logout = move |_| {
        services.get_value().session.logout();
        navigate(LOGIN_PATH, NavigateOptions::default());
    };
    view! {
        <button class="btn btn--ghost" on:click=on_logout>
            "Log out"
        </button>
    }
}

/// Sidebar layout for the admin console.
#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let who = move || session.with(|s| s.profile.as_ref().map(|p| p.display_name().to_owned())).unwrap_or_default();

    view! {
        <div class="admin-layout">
            <aside class="admin-layout__sidebar">
                <h1 class="admin-layout__brand">"Library Admin"</h1>
                <nav class="admin-layout__nav">{nav_links(ADMIN_NAV, "admin-layout__link")}</nav>
            </aside>
            <div class="admin-layout__body">
                <header class="admin-layout__header">
                    <span class="admin-layout__user">{who}</span>
                    <LogoutButton/>
                </header>
                <main class="admin-layout__content">{children()}</main>
            </div>
        </div>
    }
}

/// Top-bar layout for the reader console.
#[component]
pub fn UserLayout(children: Children) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let who = move || session.with(|s| s.profile.as_ref().map(|p| p.display_name().to_owned())).unwrap_or_default();

    view! {
        <div class="user-layout">
            <header class="user-layout__header">
                <span class="user-layout__brand">"Library"</span>
                <nav class="user-layout__nav">{nav_links(USER_NAV, "user-layout__link")}</nav>
                <span class="user-layout__user">{who}</span>
                <LogoutButton/>
            </header>
            <main class="user-layout__content">{children()}</main>
        </div>
    }
}
