//! Recording fakes for the platform seams, used by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::AuthError;
use crate::client::navigation::{Navigator, WindowManager};
use crate::client::storage::IdentityStorage;
use crate::client::telemetry::{TelemetrySink, TelemetryUser};
use crate::client::transport::{HttpMethod, HttpTransport, RawResponse};

/// Answers requests by URL path; unrouted paths answer 404.
#[derive(Default)]
pub struct StubTransport {
    routes: HashMap<String, Result<Value, u16>>,
    requests: RefCell<Vec<(HttpMethod, String)>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, path: &str, status: u16) -> Self {
        self.routes.insert(path.to_string(), Err(status));
        self
    }

    pub fn requests(&self) -> Vec<(HttpMethod, String)> {
        self.requests.borrow().clone()
    }

    /// Paths requested, without query strings.
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|(_, url)| path_of(url))
            .collect()
    }
}

fn path_of(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string())
}

#[async_trait(?Send)]
impl HttpTransport for StubTransport {
    async fn send(&self, method: HttpMethod, url: &str) -> Result<RawResponse, AuthError> {
        self.requests.borrow_mut().push((method, url.to_string()));
        match self.routes.get(&path_of(url)) {
            Some(Ok(body)) => Ok(RawResponse::new(200, body.clone())),
            Some(Err(status)) => Err(AuthError::Status(*status)),
            None => Err(AuthError::Status(404)),
        }
    }
}

/// Records navigations instead of performing them.
pub struct RecordingNavigator {
    origin: String,
    search: String,
    assigned: RefCell<Vec<String>>,
    replaced: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new(search: &str) -> Self {
        Self {
            origin: "https://app.test".to_string(),
            search: search.to_string(),
            assigned: RefCell::new(Vec::new()),
            replaced: RefCell::new(Vec::new()),
        }
    }

    pub fn assigned(&self) -> Vec<String> {
        self.assigned.borrow().clone()
    }

    pub fn replaced(&self) -> Vec<String> {
        self.replaced.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn origin(&self) -> Result<String, AuthError> {
        Ok(self.origin.clone())
    }

    fn search(&self) -> String {
        self.search.clone()
    }

    fn assign(&self, url: &str) -> Result<(), AuthError> {
        self.assigned.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn replace(&self, url: &str) -> Result<(), AuthError> {
        self.replaced.borrow_mut().push(url.to_string());
        Ok(())
    }
}

/// Records window manager calls, optionally failing the first one.
#[derive(Default)]
pub struct RecordingWindowManager {
    fail: bool,
    calls: RefCell<Vec<&'static str>>,
}

impl RecordingWindowManager {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str) -> Result<(), AuthError> {
        self.calls.borrow_mut().push(call);
        if self.fail {
            Err(AuthError::WindowManager(format!("{} failed", call)))
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl WindowManager for RecordingWindowManager {
    async fn restore_login_window(&self) -> Result<(), AuthError> {
        self.record("restore_login_window")
    }

    async fn show_decorations(&self) -> Result<(), AuthError> {
        self.record("show_decorations")
    }
}

/// Storage that refuses every write.
#[derive(Default)]
pub struct ReadOnlyStorage;

impl IdentityStorage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), AuthError> {
        Err(AuthError::Storage("quota exceeded".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingTelemetry {
    users: RefCell<Vec<TelemetryUser>>,
}

impl RecordingTelemetry {
    pub fn users(&self) -> Vec<TelemetryUser> {
        self.users.borrow().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn set_user(&self, user: TelemetryUser) {
        self.users.borrow_mut().push(user);
    }
}
