//! Reader console screens.

#[cfg(test)]
#[path = "reader_test.rs"]
mod reader_test;

use leptos::prelude::*;

use crate::app::use_services;
use crate::net::types::{Profile, UserId};
use crate::state::session::Session;

pub(crate) fn greeting(session: &Session) -> String {
    let name = session.profile.as_ref().map_or("Reader", Profile::display_name);
    format!("Welcome back, {name}")
}

/// Label/value rows for the profile card; absent fields show a dash.
pub(crate) fn profile_rows(profile: &Profile) -> Vec<(&'static str, String)> {
    let text = |v: &Option<String>| v.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| "—".to_owned());
    let id = match &profile.id {
        Some(UserId::Int(n)) => n.to_string(),
        Some(UserId::Text(s)) => s.clone(),
        None => "—".to_owned(),
    };
    vec![
        ("ID", id),
        ("Username", text(&profile.username)),
        ("Name", text(&profile.name)),
        ("Email", text(&profile.email)),
        ("Phone", text(&profile.phone)),
        ("Role", profile.role.unwrap_or_default().as_str().to_owned()),
    ]
}

#[component]
pub fn UserHomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    view! {
        <section class="console-page">
            <h1 class="console-page__title">{move || session.with(greeting)}</h1>
            <p class="console-page__blurb">"Browse the library, track what you have borrowed, and keep your profile up to date."</p>
        </section>
    }
}

#[component]
pub fn UserLibraryPage() -> impl IntoView {
    view! {
        <section class="console-page">
            <h1 class="console-page__title">"Library"</h1>
            <p class="console-page__blurb">"Titles available to borrow."</p>
        </section>
    }
}

#[component]
pub fn UserBorrowPage() -> impl IntoView {
    view! {
        <section class="console-page">
            <h1 class="console-page__title">"My borrowing"</h1>
            <p class="console-page__blurb">"Current loans and borrowing history."</p>
        </section>
    }
}

/// Profile card with a manual refresh from `GET /me`.
#[component]
pub fn UserProfilePage() -> impl IntoView {
    let services = use_services();
    let session = expect_context::<RwSignal<Session>>();
    let refreshing = RwSignal::new(false);

    let rows = move || session.with(|s| s.profile.as_ref().map(profile_rows).unwrap_or_default());

    let on_refresh = move |_| {
        if refreshing.get() {
            return;
        }
        refreshing.set(true);
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let services = services.get_value();
            if services.session.fetch_profile(&services.client).await.is_ok() {
                services.notifier.success("Profile refreshed");
            }
            refreshing.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = services;
            refreshing.set(false);
        }
    };

    view! {
        <section class="console-page profile-card">
            <h1 class="console-page__title">"Profile"</h1>
            <dl class="profile-card__fields">
                {move || {
                    rows()
                        .into_iter()
                        .map(|(label, value)| view! {
                            <dt>{label}</dt>
                            <dd>{value}</dd>
                        })
                        .collect::<Vec<_>>()
                }}
            </dl>
            <button class="btn" on:click=on_refresh disabled=move || refreshing.get()>
                "Refresh"
            </button>
        </section>
    }
}
