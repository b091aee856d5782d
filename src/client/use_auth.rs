//! Dioxus hooks exposing the Casdoor login flow to a component tree.
//!
//! `use_auth_provider` is called once at the application root. It checks the
//! session on mount, which either marks the user as authenticated or sends
//! the browser to the Casdoor login page. Descendants read the state through
//! `use_auth`.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::client::service::{AuthService, CasdoorAuthService};
use crate::user::UNKNOWN_USER_NAME;

/// Authentication state exposed by the use_auth hook.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    /// Whether the backend reported a live session
    pub is_authenticated: bool,
    /// Whether the session check is still running
    pub is_loading: bool,
    /// Display name of the signed-in user, `"--"` when unknown
    pub user_name: String,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
            user_name: UNKNOWN_USER_NAME.to_string(),
        }
    }
}

/// Provides authentication context to the component tree.
///
/// `build` runs once, on first render.
///
/// # Example
///
/// ```ignore
/// #[component]
/// pub fn App() -> Element {
///     use_auth_provider(|| {
///         CasdoorAuthService::browser(AuthConfig::from_env_or_panic())
///             .expect("browser environment")
///     });
///     // ... rest of app
/// }
/// ```
pub fn use_auth_provider(build: impl FnOnce() -> CasdoorAuthService) -> AuthContext {
    let service = use_hook(build);
    let auth_state = use_signal(AuthState::default);

    let context = use_context_provider(|| AuthContext {
        service,
        auth_state,
    });

    let on_mount = context.clone();
    use_effect(move || {
        let context = on_mount.clone();
        spawn(async move {
            context.check_login().await;
        });
    });

    context
}

/// Hook for accessing the shared authentication context.
///
/// # Panics
///
/// Panics if called without `use_auth_provider()` being called in an ancestor component.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Context object returned by use_auth hook.
#[derive(Clone)]
pub struct AuthContext {
    service: CasdoorAuthService,
    auth_state: Signal<AuthState>,
}

impl AuthContext {
    /// Returns true if the backend reported a live session.
    pub fn is_authenticated(&self) -> bool {
        self.auth_state.read().is_authenticated
    }

    /// Returns true while the session check is running.
    pub fn is_loading(&self) -> bool {
        self.auth_state.read().is_loading
    }

    /// Returns the signed-in user's display name, or `"--"`.
    pub fn user_name(&self) -> String {
        self.auth_state.read().user_name.clone()
    }

    /// Returns the underlying service, e.g. for `check_http_response`.
    pub fn service(&self) -> &CasdoorAuthService {
        &self.service
    }

    /// Checks the session and refreshes the state.
    ///
    /// When no session exists the browser is sent to the login page and the
    /// state stays in its loading form.
    pub async fn check_login(&self) {
        let authenticated = Rc::new(Cell::new(false));
        let flag = authenticated.clone();

        self.service
            .check_login(Some(Box::new(move || flag.set(true))))
            .await;

        if authenticated.get() {
            tracing::trace!("Casdoor session is live");
            let mut auth_state = self.auth_state;
            auth_state.set(AuthState {
                is_authenticated: true,
                is_loading: false,
                user_name: self.service.get_user_name(),
            });
        }
    }

    /// Signs out and follows the provider logout redirect.
    pub fn logout(&self) {
        let service = self.service.clone();
        spawn(async move {
            tracing::trace!("Initiating logout");
            service.logout().await;
        });
    }
}
