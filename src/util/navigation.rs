//! Hard navigation outside the router.
//!
//! The HTTP layer has no access to the Leptos router, so an expired session
//! is handled by replacing the browser location outright.

/// Replaces the current location.
pub trait Navigator {
    fn replace(&self, path: &str);
}

/// `window.location.replace` in the browser; logs elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn replace(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().replace(path);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("navigation to {path} skipped outside the browser");
        }
    }
}
