//! Root application component with routing and context providers.
//!
//! This is the composition root: storage, HTTP client, session store and
//! notifier are created here once and wired together. The client's 401 hook
//! is installed here so neither `net` nor `state` imports the other's
//! lifecycle.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::components::guarded::Guarded;
use crate::components::toast_host::ToastHost;
use crate::config::ClientConfig;
use crate::net::http::{ApiClient, default_transport};
use crate::router::routes::{LOGIN_PATH, find, resolve};
use crate::state::AppServices;
use crate::state::session::{Session, SessionStore};
use crate::state::toast::{Notifier, ToastNotifier, ToastState};
use crate::util::navigation::BrowserNavigator;
use crate::util::storage::default_storage;

/// Context handle for the non-reactive services. `Copy`, so event handlers
/// and resources can capture it freely.
pub type Services = StoredValue<AppServices, LocalStorage>;

/// Fetch the services provided by [`App`].
pub fn use_services() -> Services {
    expect_context::<Services>()
}

/// Build the services and keep `session_view` mirroring the session.
fn wire_services(toasts: RwSignal<ToastState>, session_view: RwSignal<Session>) -> AppServices {
    let config = ClientConfig::from_build_env();
    log::info!("API base: {}", config.api_base);

    let storage = default_storage();
    let notifier: Rc<dyn Notifier> = Rc::new(ToastNotifier::new(toasts));
    let client = ApiClient::new(
        config.clone(),
        default_transport(&config),
        storage.clone(),
        notifier.clone(),
        Rc::new(BrowserNavigator),
    );

    let session = SessionStore::load(storage);
    session_view.set(session.snapshot());
    session.subscribe(move |s| session_view.set(s.clone()));

    let on_expired = session.clone();
    client.set_unauthorized_hook(move || on_expired.logout());

    AppServices { client, session, notifier }
}

/// Guarded page for a path that must be in the route table.
fn page(path: &'static str) -> impl IntoView {
    let route = find(path).unwrap_or_else(|| {
        log::error!("no route registered for {path}");
        resolve(path)
    });
    view! { <Guarded route=route/> }
}

/// Redirect entry mounted for `from`; the target comes from the route table.
fn redirect(from: &'static str) -> impl IntoView {
    view! { <Redirect path=resolve(from).path/> }
}

/// Root application component.
///
/// Provides the session mirror, toast queue and services to every page and
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    let session_view = RwSignal::new(Session::default());
    let services = wire_services(toasts, session_view);

    provide_context(toasts);
    provide_context(session_view);
    provide_context::<Services>(StoredValue::new_local(services));

    view! {
        <Title text="Library Console"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path=LOGIN_PATH/> }>
                <Route path=path!("/") view=|| redirect("/")/>
                <Route path=path!("/login") view=|| page("/login")/>
                <Route path=path!("/register") view=|| page("/register")/>
                <Route path=path!("/admin") view=|| redirect("/admin")/>
                <Route path=path!("/admin/dashboard") view=|| page("/admin/dashboard")/>
                <Route path=path!("/admin/books") view=|| page("/admin/books")/>
                <Route path=path!("/admin/borrow") view=|| page("/admin/borrow")/>
                <Route path=path!("/admin/users") view=|| page("/admin/users")/>
                <Route path=path!("/user") view=|| redirect("/user")/>
                <Route path=path!("/user/home") view=|| page("/user/home")/>
                <Route path=path!("/user/library") view=|| page("/user/library")/>
                <Route path=path!("/user/borrow") view=|| page("/user/borrow")/>
                <Route path=path!("/user/profile") view=|| page("/user/profile")/>
            </Routes>
        </Router>

        <ToastHost/>
    }
}
