//! Route wrapper that runs the navigation guard before rendering.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every entry in the route table renders through [`Guarded`]. The page (and
//! its layout) is only built once the guard allows it, so a page never issues
//! API calls for a user who is about to be redirected.

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::use_services;
use crate::components::layout::{AdminLayout, UserLayout};
use crate::pages::admin::{BooksPage, BorrowRecordsPage, UsersPage};
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::reader::{UserBorrowPage, UserHomePage, UserLibraryPage, UserProfilePage};
use crate::pages::register::RegisterPage;
use crate::router::routes::{Layout, RouteDef, ViewKind};

/// Guarded route: evaluate, then either redirect or render.
#[component]
pub fn Guarded(route: &'static RouteDef) -> impl IntoView {
    let services = use_services();
    let navigate = use_navigate();
    let allowed = RwSignal::new(false);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let services = services.get_value();
        let decision = crate::router::guard::evaluate(route, &services).await;
        match decision.redirect_path() {
            Some(path) => navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() }),
            None => allowed.set(true),
        }
    });

    #[cfg(not(feature = "csr"))]
    {
        let _ = (services, navigate);
    }

    view! {
        <Show when=move || allowed.get()>
            {move || render_route(route)}
        </Show>
    }
}

fn render_view(view: ViewKind) -> AnyView {
    match view {
        ViewKind::Login => view! { <LoginPage/> }.into_any(),
        ViewKind::Register => view! { <RegisterPage/> }.into_any(),
        ViewKind::Dashboard => view! { <DashboardPage/> }.into_any(),
        ViewKind::Books => view! { <BooksPage/> }.into_any(),
        ViewKind::BorrowRecords => view! { <BorrowRecordsPage/> }.into_any(),
        ViewKind::Users => view! { <UsersPage/> }.into_any(),
        ViewKind::UserHome => view! { <UserHomePage/> }.into_any(),
        ViewKind::UserLibrary => view! { <UserLibraryPage/> }.into_any(),
        ViewKind::UserBorrow => view! { <UserBorrowPage/> }.into_any(),
        ViewKind::UserProfile => view! { <UserProfilePage/> }.into_any(),
    }
}

fn render_route(route: &'static RouteDef) -> AnyView {
    let view = route.view;
    match route.layout {
        Layout::Blank => render_view(view),
        Layout::Admin => view! { <AdminLayout>{render_view(view)}</AdminLayout> }.into_any(),
        Layout::User => view! { <UserLayout>{render_view(view)}</UserLayout> }.into_any(),
    }
}
