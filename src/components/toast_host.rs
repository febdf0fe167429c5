//! Fixed-position stack of transient notifications.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastLevel, ToastState};

fn toast_class(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Success => "toast toast--success",
        ToastLevel::Error => "toast toast--error",
    }
}

/// Renders the toast queue; clicking a toast dismisses it early.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host" role="status">
            <For
                each=move || toasts.get().toasts
                key=|t: &Toast| t.id
                children=move |t: Toast| {
                    let id = t.id;
                    view! {
                        <div class=toast_class(t.level) on:click=move |_| toasts.update(|s| s.dismiss(id))>
                            {t.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
