//! Navigation guard.
//!
//! Runs before a route renders and yields exactly one [`NavigationDecision`]:
//!
//! 1. Login/register are always allowed, but entering them ends any
//!    persisted session first.
//! 2. Without a persisted token everything else redirects to login.
//! 3. A missing profile is fetched once; failure ends the session.
//! 4. Role rules: readers are kept out of the admin console and admins out
//!    of the reader console.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::routes::{ADMIN_HOME_PATH, LOGIN_PATH, RouteDef, RouteMeta, USER_HOME_PATH, is_public};
use crate::net::types::Role;
use crate::state::AppServices;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please log in again";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    RedirectLogin,
    /// Non-admin hit an admin-only route.
    RedirectUserHome,
    /// Admin hit a reader-only route.
    RedirectAdminDashboard,
}

impl NavigationDecision {
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectLogin => Some(LOGIN_PATH),
            Self::RedirectUserHome => Some(USER_HOME_PATH),
            Self::RedirectAdminDashboard => Some(ADMIN_HOME_PATH),
        }
    }
}

/// Decide whether `target` may render.
pub async fn evaluate(target: &RouteDef, services: &AppServices) -> NavigationDecision {
    let session = &services.session;

    if is_public(target.path) {
        if session.persisted_token().is_some() {
            log::info!("entering {} ends the current session", target.path);
            session.logout();
        }
        return NavigationDecision::Allow;
    }

    if session.persisted_token().is_none() {
        log::debug!("{} needs a session; redirecting to login", target.path);
        return NavigationDecision::RedirectLogin;
    }

    if !session.has_profile() {
        if let Err(e) = session.fetch_profile(&services.client).await {
            log::warn!("profile fetch failed during navigation: {e}");
            session.logout();
            services.notifier.error(SESSION_EXPIRED_MESSAGE);
            return NavigationDecision::RedirectLogin;
        }
    }

    let decision = authorize(target.meta, session.role());
    if decision != NavigationDecision::Allow {
        log::debug!("{} not permitted for role {}: {decision:?}", target.path, session.role().as_str());
    }
    decision
}

/// Role check for an authenticated user.
pub fn authorize(meta: RouteMeta, role: Role) -> NavigationDecision {
    if meta.requires_admin && role != Role::Admin {
        NavigationDecision::RedirectUserHome
    } else if meta.requires_user && role == Role::Admin {
        NavigationDecision::RedirectAdminDashboard
    } else {
        NavigationDecision::Allow
    }
}
