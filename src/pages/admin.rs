//! Admin console screens beyond the dashboard.
//!
//! Catalog, borrow-record and user management render their section shell
//! inside `AdminLayout`; record editing is handled server-side.

use leptos::prelude::*;

#[component]
fn Section(title: &'static str, blurb: &'static str) -> impl IntoView {
    view! {
        <section class="console-page">
            <h1 class="console-page__title">{title}</h1>
            <p class="console-page__blurb">{blurb}</p>
        </section>
    }
}

#[component]
pub fn BooksPage() -> impl IntoView {
    view! { <Section title="Books" blurb="Catalog of titles held by the library."/> }
}

#[component]
pub fn BorrowRecordsPage() -> impl IntoView {
    view! { <Section title="Borrow records" blurb="Loans, returns and overdue items across all readers."/> }
}

#[component]
pub fn UsersPage() -> impl IntoView {
    view! { <Section title="Users" blurb="Reader and administrator accounts."/> }
}
