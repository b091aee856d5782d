//! Page location access and navigation.
//!
//! Every navigation in the login flow is a full document load: the page is
//! left for the identity provider, or reloaded at the application root.
//! Pending async work in the old document is simply abandoned.

use async_trait::async_trait;

use crate::AuthError;

/// Read and change the current document location.
pub trait Navigator {
    /// Origin of the current page, e.g. `https://app.example.com`.
    fn origin(&self) -> Result<String, AuthError>;

    /// Query string of the current page, including the leading `?`.
    fn search(&self) -> String;

    /// Loads `url`, keeping the current page in history.
    fn assign(&self, url: &str) -> Result<(), AuthError>;

    /// Loads `url`, replacing the current history entry.
    fn replace(&self, url: &str) -> Result<(), AuthError>;
}

/// Desktop shell integration around the login window.
///
/// Only present when the application runs inside a desktop wrapper; plain
/// browsers have no window manager.
#[async_trait(?Send)]
pub trait WindowManager {
    /// Restores (un-minimizes) the login window.
    async fn restore_login_window(&self) -> Result<(), AuthError>;

    /// Makes the window decorations visible.
    async fn show_decorations(&self) -> Result<(), AuthError>;
}

/// `window.location` of the current document.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl BrowserNavigator {
    fn location() -> Result<web_sys::Location, AuthError> {
        web_sys::window()
            .map(|w| w.location())
            .ok_or(AuthError::Unavailable("window"))
    }
}

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn origin(&self) -> Result<String, AuthError> {
        Self::location()?
            .origin()
            .map_err(|e| AuthError::Navigation(format!("{:?}", e)))
    }

    fn search(&self) -> String {
        Self::location()
            .ok()
            .and_then(|l| l.search().ok())
            .unwrap_or_default()
    }

    fn assign(&self, url: &str) -> Result<(), AuthError> {
        tracing::trace!("Navigating to {}", url);
        Self::location()?
            .set_href(url)
            .map_err(|e| AuthError::Navigation(format!("{:?}", e)))
    }

    fn replace(&self, url: &str) -> Result<(), AuthError> {
        tracing::trace!("Replacing location with {}", url);
        Self::location()?
            .replace(url)
            .map_err(|e| AuthError::Navigation(format!("{:?}", e)))
    }
}

/// Non-WASM stub: there is no document to navigate.
#[cfg(not(target_arch = "wasm32"))]
impl Navigator for BrowserNavigator {
    fn origin(&self) -> Result<String, AuthError> {
        Err(AuthError::Unavailable("window.location"))
    }

    fn search(&self) -> String {
        String::new()
    }

    fn assign(&self, url: &str) -> Result<(), AuthError> {
        tracing::warn!("Navigation to {} not supported in non-WASM builds", url);
        Err(AuthError::Unavailable("window.location"))
    }

    fn replace(&self, url: &str) -> Result<(), AuthError> {
        tracing::warn!("Navigation to {} not supported in non-WASM builds", url);
        Err(AuthError::Unavailable("window.location"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_browser_navigator_is_inert_outside_browser() {
        let navigator = BrowserNavigator;
        assert!(navigator.origin().is_err());
        assert_eq!(navigator.search(), "");
        assert!(matches!(
            navigator.assign("https://idp.test/login"),
            Err(AuthError::Unavailable(_))
        ));
        assert!(navigator.replace("/").is_err());
    }
}
