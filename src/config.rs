//! Backend configuration for the Casdoor login flow.
//!
//! The browser never talks to Casdoor directly. Every call goes through a
//! backend proxy whose base URL is held here, together with the endpoint
//! paths that proxy exposes.

use serde::{Deserialize, Serialize};

/// Login status check, answers with code `900001` when not logged in.
pub const LOGIN_CHECK_PATH: &str = "/robot/user/login-check";
/// Provider-hosted login page URL.
pub const REDIRECT_URL_PATH: &str = "/robot/user/redirect-url";
/// Code/state exchange.
pub const SIGN_IN_PATH: &str = "/robot/user/sign/in";
/// Sign-out, answers with the provider logout URL.
pub const SIGN_OUT_PATH: &str = "/robot/user/sign/out";
/// Alternate provider login status.
pub const UAP_LOGIN_STATUS_PATH: &str = "/robot/login-status";
/// Alternate provider logout.
pub const UAP_LOGOUT_PATH: &str = "/robot/logout";
/// Alternate provider user info.
pub const UAP_USER_INFO_PATH: &str = "/robot/user/info";

/// Page the identity provider sends the browser back to.
pub const BOOT_PAGE_PATH: &str = "/boot.html";
/// Application root, loaded after a successful sign-in.
pub const APP_ROOT_PATH: &str = "/";

/// Configuration for the backend that proxies Casdoor.
///
/// # Fields
///
/// - `base_url`: prefix of every endpoint, either absolute
///   (`https://robot.example.com/api`) or relative to the page origin (`/api`)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,
}

impl AuthConfig {
    /// Creates a new AuthConfig, trimming any trailing slash.
    ///
    /// # Example
    ///
    /// ```
    /// # use dxcasdoor::AuthConfig;
    /// let config = AuthConfig::new("https://robot.example.com/api/");
    /// assert_eq!(config.base_url, "https://robot.example.com/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Loads AuthConfig from the compile-time `CASDOOR_API_BASE_URL` variable.
    ///
    /// Returns `None` if the variable was not set at compile time.
    pub fn from_env() -> Option<Self> {
        option_env!("CASDOOR_API_BASE_URL").map(Self::new)
    }

    /// Loads AuthConfig from the compile-time environment or panics.
    ///
    /// # Panics
    ///
    /// Panics if `CASDOOR_API_BASE_URL` was not set at compile time.
    pub fn from_env_or_panic() -> Self {
        Self::from_env().expect(
            "Casdoor backend configuration not found. Set CASDOOR_API_BASE_URL at compile time \
             or add it to a .env file next to Cargo.toml.",
        )
    }

    /// Returns true if the base URL carries its own scheme and host.
    pub fn is_absolute(&self) -> bool {
        url::Url::parse(&self.base_url).is_ok()
    }

    /// Resolves a relative base URL against the page origin.
    ///
    /// Absolute base URLs are returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// # use dxcasdoor::AuthConfig;
    /// let config = AuthConfig::new("/api").resolved_against("https://app.example.com");
    /// assert_eq!(config.base_url, "https://app.example.com/api");
    /// ```
    pub fn resolved_against(&self, origin: &str) -> Self {
        if self.is_absolute() {
            return self.clone();
        }
        let path = self.base_url.trim_start_matches('/');
        let origin = origin.trim_end_matches('/');
        if path.is_empty() {
            Self::new(origin)
        } else {
            Self::new(format!("{}/{}", origin, path))
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Returns the login status endpoint URL.
    pub fn login_check_url(&self) -> String {
        self.endpoint(LOGIN_CHECK_PATH)
    }

    /// Returns the endpoint answering with the provider login page URL.
    pub fn redirect_url_url(&self) -> String {
        self.endpoint(REDIRECT_URL_PATH)
    }

    /// Returns the sign-in endpoint URL carrying the callback parameters.
    ///
    /// Both values are percent-encoded. An absent value is sent empty.
    ///
    /// # Example
    ///
    /// ```
    /// # use dxcasdoor::AuthConfig;
    /// let config = AuthConfig::new("https://robot.example.com");
    /// assert_eq!(
    ///     config.sign_in_url(Some("a b"), Some("xyz")),
    ///     "https://robot.example.com/robot/user/sign/in?code=a%20b&state=xyz"
    /// );
    /// ```
    pub fn sign_in_url(&self, code: Option<&str>, state: Option<&str>) -> String {
        format!(
            "{}?code={}&state={}",
            self.endpoint(SIGN_IN_PATH),
            urlencoding::encode(code.unwrap_or_default()),
            urlencoding::encode(state.unwrap_or_default())
        )
    }

    /// Returns the sign-out endpoint URL.
    pub fn sign_out_url(&self) -> String {
        self.endpoint(SIGN_OUT_PATH)
    }

    /// Returns the alternate provider login status endpoint URL.
    pub fn uap_login_status_url(&self) -> String {
        self.endpoint(UAP_LOGIN_STATUS_PATH)
    }

    /// Returns the alternate provider logout endpoint URL.
    pub fn uap_logout_url(&self) -> String {
        self.endpoint(UAP_LOGOUT_PATH)
    }

    /// Returns the alternate provider user info endpoint URL.
    pub fn uap_user_info_url(&self) -> String {
        self.endpoint(UAP_USER_INFO_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::new("https://robot.test/api")
    }

    #[test]
    fn test_new_trims_trailing_slashes() {
        assert_eq!(AuthConfig::new("https://robot.test//").base_url, "https://robot.test");
    }

    #[test]
    fn test_endpoint_urls() {
        let config = config();
        assert_eq!(config.login_check_url(), "https://robot.test/api/robot/user/login-check");
        assert_eq!(config.redirect_url_url(), "https://robot.test/api/robot/user/redirect-url");
        assert_eq!(config.sign_out_url(), "https://robot.test/api/robot/user/sign/out");
        assert_eq!(config.uap_login_status_url(), "https://robot.test/api/robot/login-status");
        assert_eq!(config.uap_logout_url(), "https://robot.test/api/robot/logout");
        assert_eq!(config.uap_user_info_url(), "https://robot.test/api/robot/user/info");
    }

    #[test]
    fn test_sign_in_url_encodes_parameters() {
        assert_eq!(
            config().sign_in_url(Some("c&d=1"), Some("s/t")),
            "https://robot.test/api/robot/user/sign/in?code=c%26d%3D1&state=s%2Ft"
        );
    }

    #[test]
    fn test_sign_in_url_with_missing_values() {
        assert_eq!(
            config().sign_in_url(None, None),
            "https://robot.test/api/robot/user/sign/in?code=&state="
        );
    }

    #[test]
    fn test_is_absolute() {
        assert!(config().is_absolute());
        assert!(!AuthConfig::new("/api").is_absolute());
    }

    #[test]
    fn test_resolved_against_relative() {
        let resolved = AuthConfig::new("/api").resolved_against("https://app.test/");
        assert_eq!(resolved.base_url, "https://app.test/api");
    }

    #[test]
    fn test_resolved_against_empty() {
        let resolved = AuthConfig::new("").resolved_against("https://app.test");
        assert_eq!(resolved.base_url, "https://app.test");
    }

    #[test]
    fn test_resolved_against_absolute_is_unchanged() {
        let config = config();
        assert_eq!(config.resolved_against("https://other.test"), config);
    }

    #[test]
    fn test_serialization() {
        let config = config();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AuthConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_from_env() {
        // Only populated when CASDOOR_API_BASE_URL was set at compile time
        if let Some(config) = AuthConfig::from_env() {
            assert!(!config.base_url.ends_with('/'));
            assert_eq!(AuthConfig::from_env_or_panic(), config);
        }
    }
}
