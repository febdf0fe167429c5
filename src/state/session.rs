//! Auth-session store for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth for token, role and profile. The navigation guard
//! reads it, the login page and layouts mutate it, and the HTTP client's
//! unauthorized hook clears it.
//!
//! DESIGN
//! ======
//! Persistence is write-through: every mutation rewrites all three storage
//! entries before returning, so a reload always sees what memory saw. No
//! `RefCell` borrow is held across an await, which lets a 401 during
//! `fetch_profile` call back into `logout` safely.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::net::api;
use crate::net::http::{ApiClient, ApiError};
use crate::net::types::{Profile, Role};
use crate::util::storage::KeyValueStore;

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const PROFILE_KEY: &str = "profile";

/// Token, role and profile of the current user. An empty token means
/// nobody is signed in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub profile: Option<Profile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Read a session back from storage. Missing or corrupt entries fall
    /// back to their defaults.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        let token = storage.get_item(TOKEN_KEY).unwrap_or_default();
        let role = storage.get_item(ROLE_KEY).map_or(Role::User, |r| Role::parse(&r));
        let profile = storage.get_item(PROFILE_KEY).and_then(|raw| match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::warn!("discarding unreadable stored profile: {e}");
                None
            }
        });
        Self { token, role, profile }
    }

    /// Write every field to storage; empty fields remove their entry.
    fn persist(&self, storage: &dyn KeyValueStore) {
        if self.token.is_empty() {
            storage.remove_item(TOKEN_KEY);
        } else {
            storage.set_item(TOKEN_KEY, &self.token);
        }
        storage.set_item(ROLE_KEY, self.role.as_str());
        match self.profile.as_ref().map(serde_json::to_string) {
            Some(Ok(raw)) => storage.set_item(PROFILE_KEY, &raw),
            Some(Err(e)) => {
                log::warn!("profile not serializable, dropping stored copy: {e}");
                storage.remove_item(PROFILE_KEY);
            }
            None => storage.remove_item(PROFILE_KEY),
        }
    }
}

/// Remove every session entry from storage.
pub fn clear_persisted(storage: &dyn KeyValueStore) {
    storage.remove_item(TOKEN_KEY);
    storage.remove_item(ROLE_KEY);
    storage.remove_item(PROFILE_KEY);
}

type Listener = Rc<dyn Fn(&Session)>;

/// Shared handle to the session. Clones refer to the same session.
#[derive(Clone)]
pub struct SessionStore {
    session: Rc<RefCell<Session>>,
    storage: Rc<dyn KeyValueStore>,
    listener: Rc<RefCell<Option<Listener>>>,
}

impl SessionStore {
    /// Initialize from whatever `storage` currently holds.
    pub fn load(storage: Rc<dyn KeyValueStore>) -> Self {
        let session = Session::load(storage.as_ref());
        log::debug!("session loaded (authenticated: {})", session.is_authenticated());
        Self { session: Rc::new(RefCell::new(session)), storage, listener: Rc::new(RefCell::new(None)) }
    }

    /// Snapshot of the current session.
    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn token(&self) -> String {
        self.session.borrow().token.clone()
    }

    pub fn role(&self) -> Role {
        self.session.borrow().role
    }

    pub fn profile(&self) -> Option<Profile> {
        self.session.borrow().profile.clone()
    }

    pub fn has_profile(&self) -> bool {
        self.session.borrow().profile.is_some()
    }

    /// Token as currently persisted, which may differ from memory if another
    /// tab or the HTTP fallback touched storage.
    pub fn persisted_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Register the callback invoked with a snapshot after every mutation.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    /// Record a fresh login.
    ///
    /// Role comes from `user_info.role` when present, otherwise the current
    /// role is kept.
    pub fn set_auth(&self, token: impl Into<String>, user_info: Profile) {
        self.mutate(|s| {
            s.token = token.into();
            if let Some(role) = user_info.role {
                s.role = role;
            }
            s.profile.get_or_insert_with(Profile::default).merge(user_info);
        });
        log::info!("signed in as {}", self.role().as_str());
    }

    /// Merge `info` into the profile, adopting its role if it names one.
    pub fn set_profile(&self, info: Profile) {
        self.mutate(|s| {
            if let Some(role) = info.role {
                s.role = role;
            }
            s.profile.get_or_insert_with(Profile::default).merge(info);
        });
    }

    /// Refresh the profile from `GET /me`.
    ///
    /// Returns `Ok(None)` without touching the network when signed out.
    ///
    /// # Errors
    ///
    /// Propagates the [`ApiError`] from the request; the session is left as
    /// it was (apart from whatever the 401 hook did).
    pub async fn fetch_profile(&self, client: &ApiClient) -> Result<Option<Profile>, ApiError> {
        if !self.session.borrow().is_authenticated() {
            return Ok(None);
        }
        let profile = api::fetch_me(client).await?;
        self.set_profile(profile.clone());
        Ok(Some(profile))
    }

    /// Clear the session in memory and in storage.
    pub fn logout(&self) {
        {
            let mut session = self.session.borrow_mut();
            *session = Session::default();
            clear_persisted(self.storage.as_ref());
        }
        log::info!("session cleared");
        self.notify();
    }

    fn mutate(&self, f: impl FnOnce(&mut Session)) {
        {
            let mut session = self.session.borrow_mut();
            f(&mut session);
            session.persist(self.storage.as_ref());
        }
        self.notify();
    }

    fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(&self.snapshot());
        }
    }
}
