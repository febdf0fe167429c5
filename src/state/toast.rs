//! Transient user notifications.
//!
//! DESIGN
//! ======
//! Network and guard code only see the [`Notifier`] trait; the UI backs it
//! with a reactive [`ToastState`] rendered by `ToastHost`.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;

/// Milliseconds an error toast stays on screen.
pub const TOAST_TTL_MS: u32 = 3_000;

/// Sink for user-facing messages.
pub trait Notifier {
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Queue of visible toasts, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Append a toast and return its id.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, level, message: message.into() });
        id
    }

    /// Remove a toast; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}

/// [`Notifier`] backed by a `ToastState` signal.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    state: RwSignal<ToastState>,
}

impl ToastNotifier {
    pub fn new(state: RwSignal<ToastState>) -> Self {
        Self { state }
    }

    fn show(&self, level: ToastLevel, message: &str) {
        let mut id = 0;
        self.state.update(|s| id = s.push(level, message));

        #[cfg(feature = "csr")]
        {
            let state = self.state;
            gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || {
                state.update(|s| s.dismiss(id));
            })
            .forget();
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    }
}

impl Notifier for ToastNotifier {
    fn error(&self, message: &str) {
        log::warn!("{message}");
        self.show(ToastLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.show(ToastLevel::Success, message);
    }
}
