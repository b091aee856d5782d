//! Casdoor login flow orchestration.
//!
//! Per page load the flow is:
//!
//! - **Entry** (`login`): look for `code` and `state` in the query string
//! - **Exchanging**: both present, trade them for a session, persist the
//!   identity and reload at `/`
//! - **Redirecting**: otherwise, send the browser to the provider login page
//!   with `redirect_uri=<origin>/boot.html`
//!
//! Failures end the flow quietly: nothing is navigated, nothing is retried.

use std::rc::Rc;

use async_trait::async_trait;

use crate::client::api::AuthApiClient;
use crate::client::navigation::{BrowserNavigator, Navigator, WindowManager};
use crate::client::query::{query_param, set_url_query_field};
use crate::client::storage::{IdentityStorage, LocalStorage, USER_INFO_STORAGE_KEY};
use crate::client::task::{DefaultSpawner, TaskSpawner};
use crate::client::transport::{RawResponse, ReqwestTransport};
use crate::config::{APP_ROOT_PATH, BOOT_PAGE_PATH};
use crate::{AuthConfig, AuthError, UserInfo};

/// Callback run by [`AuthService::check_login`] when a session exists.
pub type OnAuthenticated = Box<dyn FnOnce()>;

/// Login capabilities the application relies on, whatever the provider.
#[async_trait(?Send)]
pub trait AuthService {
    /// Completes a provider callback, or redirects to the provider login page.
    async fn login(&self);

    /// Ends the session and redirects to the provider logout page.
    async fn logout(&self);

    /// Runs `on_authenticated` if logged in, otherwise starts [`login`](Self::login).
    async fn check_login(&self, on_authenticated: Option<OnAuthenticated>);

    /// Display name of the signed-in user, or `"--"`.
    fn get_user_name(&self) -> String;

    /// Returns true if `response` reports an expired session.
    ///
    /// When it does, a redirect to the login page is started in the
    /// background. The return value does not depend on whether that redirect
    /// could be started.
    fn check_http_response(&self, response: &RawResponse) -> bool;
}

struct Inner {
    api: AuthApiClient,
    storage: Rc<dyn IdentityStorage>,
    navigator: Rc<dyn Navigator>,
    window_manager: Option<Rc<dyn WindowManager>>,
    spawner: Rc<dyn TaskSpawner>,
}

/// [`AuthService`] backed by a Casdoor proxy.
///
/// Cheap to clone; clones share the same collaborators.
#[derive(Clone)]
pub struct CasdoorAuthService {
    inner: Rc<Inner>,
}

impl CasdoorAuthService {
    pub fn new(
        api: AuthApiClient,
        storage: Rc<dyn IdentityStorage>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                storage,
                navigator,
                window_manager: None,
                spawner: Rc::new(DefaultSpawner),
            }),
        }
    }

    /// Wires the service to the current document: reqwest, `localStorage`
    /// and `window.location`.
    ///
    /// A relative base URL is resolved against the page origin.
    pub fn browser(config: AuthConfig) -> Result<Self, AuthError> {
        let navigator = BrowserNavigator;
        let config = if config.is_absolute() {
            config
        } else {
            config.resolved_against(&navigator.origin()?)
        };

        let api = AuthApiClient::new(config, Rc::new(ReqwestTransport::new()?));
        Ok(Self::new(api, Rc::new(LocalStorage), Rc::new(navigator)))
    }

    /// Adds the desktop shell window manager.
    ///
    /// Clones taken before this call keep running without it.
    pub fn with_window_manager(self, window_manager: Rc<dyn WindowManager>) -> Self {
        let inner = self.into_inner();
        Self {
            inner: Rc::new(Inner {
                window_manager: Some(window_manager),
                ..inner
            }),
        }
    }

    /// Replaces the executor for background redirects.
    ///
    /// Native hosts that drive the service from a `tokio::task::LocalSet`
    /// install `TokioLocalSpawner` here.
    pub fn with_spawner(self, spawner: Rc<dyn TaskSpawner>) -> Self {
        let inner = self.into_inner();
        Self {
            inner: Rc::new(Inner { spawner, ..inner }),
        }
    }

    fn into_inner(self) -> Inner {
        match Rc::try_unwrap(self.inner) {
            Ok(inner) => inner,
            Err(shared) => Inner {
                api: shared.api.clone(),
                storage: shared.storage.clone(),
                navigator: shared.navigator.clone(),
                window_manager: shared.window_manager.clone(),
                spawner: shared.spawner.clone(),
            },
        }
    }

    pub fn api(&self) -> &AuthApiClient {
        &self.inner.api
    }

    /// Reads the persisted identity, tolerating absence and corruption.
    pub fn stored_user(&self) -> UserInfo {
        let blob = self.inner.storage.get(USER_INFO_STORAGE_KEY);
        UserInfo::from_persisted(blob.as_deref())
    }

    async fn is_logged_in(&self) -> bool {
        self.inner.api.check_login_status().await
    }

    fn boot_page_url(&self) -> Result<String, AuthError> {
        Ok(format!("{}{}", self.inner.navigator.origin()?, BOOT_PAGE_PATH))
    }

    async fn sign_in(&self, code: &str, state: &str) {
        if let Err(e) = self.exchange_code(code, state).await {
            tracing::error!("Casdoor sign-in failed: {}", e);
        }
    }

    async fn exchange_code(&self, code: &str, state: &str) -> Result<(), AuthError> {
        tracing::trace!("Exchanging Casdoor callback code for a session");

        let response = self.inner.api.sign_in(Some(code), Some(state)).await?;
        let identity = serde_json::to_string(response.payload())?;
        self.inner.storage.set(USER_INFO_STORAGE_KEY, &identity)?;
        self.inner.navigator.replace(APP_ROOT_PATH)
    }

    async fn redirect_to_login(&self) {
        if let Err(e) = self.try_redirect_to_login().await {
            tracing::debug!("Redirect to Casdoor login abandoned: {}", e);
        }
    }

    async fn try_redirect_to_login(&self) -> Result<(), AuthError> {
        let response = self.inner.api.get_login_url().await?;
        let login_url = response.payload().as_str().unwrap_or_default();
        if login_url.is_empty() {
            tracing::debug!("Backend returned no Casdoor login URL");
            return Ok(());
        }

        let login_url = set_url_query_field("redirect_uri", &self.boot_page_url()?, login_url)?;

        if let Some(window_manager) = &self.inner.window_manager {
            window_manager.restore_login_window().await?;
            window_manager.show_decorations().await?;
        }

        tracing::trace!("Redirecting to Casdoor login: {}", login_url);
        self.inner.navigator.assign(&login_url)
    }

    async fn try_logout(&self) -> Result<(), AuthError> {
        let response = self.inner.api.sign_out().await?;
        let logout_url = response
            .payload()
            .get("logoutUrl")
            .and_then(|url| url.as_str())
            .ok_or(AuthError::MissingField("logoutUrl"))?;

        let logout_url =
            set_url_query_field("post_logout_redirect_uri", &self.boot_page_url()?, logout_url)?;

        tracing::trace!("Redirecting to Casdoor logout: {}", logout_url);
        self.inner.navigator.assign(&logout_url)
    }
}

#[async_trait(?Send)]
impl AuthService for CasdoorAuthService {
    async fn login(&self) {
        let search = self.inner.navigator.search();
        let code = query_param(&search, "code");
        let state = query_param(&search, "state");

        if let (Some(code), Some(state)) = (code, state) {
            self.sign_in(&code, &state).await;
            return;
        }

        self.redirect_to_login().await;
    }

    async fn logout(&self) {
        if let Err(e) = self.try_logout().await {
            tracing::error!("Casdoor sign-out failed: {}", e);
        }
    }

    async fn check_login(&self, on_authenticated: Option<OnAuthenticated>) {
        if self.is_logged_in().await {
            if let Some(callback) = on_authenticated {
                callback();
            }
            return;
        }

        self.login().await;
    }

    fn get_user_name(&self) -> String {
        self.stored_user().display_name_or_placeholder().to_string()
    }

    fn check_http_response(&self, response: &RawResponse) -> bool {
        let expired = response.is_session_expired();
        if expired {
            tracing::trace!("Session expired, redirecting to Casdoor login");
            let service = self.clone();
            let started = self
                .inner
                .spawner
                .spawn_detached(Box::pin(async move { service.redirect_to_login().await }));
            if !started {
                tracing::debug!("Background redirect to Casdoor login was not started");
            }
        }
        expired
    }
}
