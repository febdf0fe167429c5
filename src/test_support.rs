//! Fakes shared by the session, HTTP and guard tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::net::http::{ApiClient, HttpRequest, HttpResponse, Transport, TransportError};
use crate::state::session::SessionStore;
use crate::state::toast::Notifier;
use crate::util::navigation::Navigator;
use crate::util::storage::MemoryStorage;

pub const TEST_API_BASE: &str = "http://api.test";

/// Transport that replays queued outcomes and records what it was sent.
#[derive(Default)]
pub struct FakeTransport {
    outcomes: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_owned() }));
    }

    pub fn fail(&self, error: TransportError) {
        self.outcomes.borrow_mut().push_back(Err(error));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no queued response".to_owned())))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub errors: RefCell<Vec<String>>,
    pub successes: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_owned());
    }

    fn success(&self, message: &str) {
        self.successes.borrow_mut().push(message.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub visits: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_owned());
    }
}

/// A wired-up client + session over in-memory fakes.
pub struct Harness {
    pub storage: MemoryStorage,
    pub transport: Rc<FakeTransport>,
    pub notifier: Rc<RecordingNotifier>,
    pub navigator: Rc<RecordingNavigator>,
    pub client: ApiClient,
    pub session: SessionStore,
    pub logouts: Rc<RefCell<usize>>,
}

impl Harness {
    /// Client without an unauthorized hook and a session loaded from `storage`.
    pub fn unwired(storage: MemoryStorage) -> Self {
        let transport = Rc::new(FakeTransport::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let navigator = Rc::new(RecordingNavigator::default());
        let client = ApiClient::new(
            ClientConfig::from_override(Some(TEST_API_BASE)),
            transport.clone(),
            Rc::new(storage.clone()),
            notifier.clone(),
            navigator.clone(),
        );
        let session = SessionStore::load(Rc::new(storage.clone()));
        Self { storage, transport, notifier, navigator, client, session, logouts: Rc::new(RefCell::new(0)) }
    }

    /// Fully wired: 401 responses log the session out and count the call.
    pub fn new(storage: MemoryStorage) -> Self {
        let harness = Self::unwired(storage);
        let session = harness.session.clone();
        let logouts = harness.logouts.clone();
        harness.client.set_unauthorized_hook(move || {
            *logouts.borrow_mut() += 1;
            session.logout();
        });
        harness
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifier.errors.borrow().clone()
    }

    pub fn visits(&self) -> Vec<String> {
        self.navigator.visits.borrow().clone()
    }

    pub fn logout_count(&self) -> usize {
        *self.logouts.borrow()
    }
}
