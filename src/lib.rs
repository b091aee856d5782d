//! # dxcasdoor
//!
//! Casdoor login for browser single-page applications, through a backend
//! proxy.
//!
//! ## Overview
//!
//! The application never talks to Casdoor directly. A backend exposes a
//! handful of `/robot/...` endpoints and this crate drives them:
//!
//! - **Shared types** (`AuthConfig`, `UserInfo`, `AuthError`)
//! - **API client** (`client::AuthApiClient`) - one HTTP call per operation
//! - **Service** (`client::CasdoorAuthService`) - login state, the redirect to
//!   the Casdoor login page, the code/state callback, logout and
//!   session-expiry handling
//! - **Hooks** (`client::use_auth`, feature `hooks`) - Dioxus context
//!
//! ## Login Flow
//!
//! 1. `check_login` asks the backend whether a session exists
//! 2. Without one, the backend supplies the Casdoor login URL and the browser
//!    is sent there with `redirect_uri=<origin>/boot.html`
//! 3. Casdoor redirects back with `code` and `state`; `login` exchanges them,
//!    stores the returned identity under `userInfo` and reloads at `/`
//! 4. Any later response carrying code `900001` triggers step 2 again
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dxcasdoor::AuthConfig;
//! use dxcasdoor::client::{AuthService, CasdoorAuthService};
//!
//! let service = CasdoorAuthService::browser(AuthConfig::from_env_or_panic())?;
//! service.check_login(None).await;
//! let name = service.get_user_name();
//! ```
//!
//! ## Platform Compatibility
//!
//! | Component | WASM (Browser) | Native |
//! |-----------|----------------|--------|
//! | API client | ✅ | ✅ |
//! | `LocalStorage`, `BrowserNavigator` | ✅ | inert stubs |
//! | Background redirects | `spawn_local` | inside a tokio `LocalSet` |
//!
//! Native builds exist for tests and for embedding the API client in tools.

pub mod config;
pub mod error;
pub mod user;

pub mod client;

pub use config::AuthConfig;
pub use error::AuthError;
pub use user::UserInfo;
