//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the durable auth state shared with the network layer;
//! `toast` is transient UI feedback. `AppServices` bundles the long-lived
//! handles the composition root hands to every page.

pub mod session;
pub mod toast;

use std::rc::Rc;

use crate::net::http::ApiClient;
use session::SessionStore;
use toast::Notifier;

/// Long-lived handles created once in `App`.
#[derive(Clone)]
pub struct AppServices {
    pub client: ApiClient,
    pub session: SessionStore,
    pub notifier: Rc<dyn Notifier>,
}
