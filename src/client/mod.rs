//! Browser-side Casdoor login flow.
//!
//! This module provides:
//! - `api`: one request function per backend auth endpoint
//! - `service`: the login/logout orchestration (`CasdoorAuthService`)
//! - `query`: redirect URL query string helpers
//! - `transport`, `storage`, `navigation`, `telemetry`, `task`: platform seams
//!   with browser implementations on `wasm32` and inert stubs elsewhere
//! - `use_auth`: Dioxus hooks (feature `hooks`)
//!
//! # Example
//!
//! ```rust,ignore
//! use dxcasdoor::AuthConfig;
//! use dxcasdoor::client::{AuthService, CasdoorAuthService};
//!
//! let service = CasdoorAuthService::browser(AuthConfig::from_env_or_panic())?;
//!
//! // On every page load: completes the provider callback or redirects to login
//! service.check_login(Some(Box::new(|| render_app()))).await;
//!
//! // After any API call made by the application
//! if service.check_http_response(&response) {
//!     return;
//! }
//! ```

pub mod api;
pub mod navigation;
pub mod query;
pub mod service;
pub mod storage;
pub mod task;
pub mod telemetry;
pub mod transport;
#[cfg(feature = "hooks")]
pub mod use_auth;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types and functions
pub use api::AuthApiClient;
pub use navigation::{BrowserNavigator, Navigator, WindowManager};
pub use query::{query_param, set_url_query_field};
pub use service::{AuthService, CasdoorAuthService, OnAuthenticated};
pub use storage::{IdentityStorage, LocalStorage, MemoryStorage, USER_INFO_STORAGE_KEY};
pub use task::{DefaultSpawner, LocalTask, TaskSpawner};
#[cfg(not(target_arch = "wasm32"))]
pub use task::TokioLocalSpawner;
pub use telemetry::{TelemetrySink, TelemetryUser, TracingTelemetry};
pub use transport::{HttpMethod, HttpTransport, RawResponse, ReqwestTransport, SESSION_EXPIRED_CODE};
#[cfg(feature = "hooks")]
pub use use_auth::{AuthContext, AuthState, use_auth, use_auth_provider};
