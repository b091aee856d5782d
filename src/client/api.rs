//! Request functions for the backend auth endpoints.
//!
//! One method per remote operation, one HTTP call per method. Nothing is
//! retried or cached. Only `check_login_status` swallows failures; every
//! other method hands the transport error back to the caller.

use std::rc::Rc;

use crate::client::telemetry::{TelemetrySink, TelemetryUser, TracingTelemetry};
use crate::client::transport::{HttpMethod, HttpTransport, RawResponse};
use crate::{AuthConfig, AuthError, UserInfo};

/// Client for the backend endpoints that proxy Casdoor.
#[derive(Clone)]
pub struct AuthApiClient {
    config: AuthConfig,
    transport: Rc<dyn HttpTransport>,
    telemetry: Rc<dyn TelemetrySink>,
}

impl AuthApiClient {
    /// Creates a client reporting users to [`TracingTelemetry`].
    pub fn new(config: AuthConfig, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            telemetry: Rc::new(TracingTelemetry),
        }
    }

    /// Replaces the telemetry sink.
    pub fn with_telemetry(mut self, telemetry: Rc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Returns false if the backend reports no session, or on any failure.
    pub async fn check_login_status(&self) -> bool {
        match self
            .transport
            .send(HttpMethod::Get, &self.config.login_check_url())
            .await
        {
            Ok(response) => !response.is_session_expired(),
            Err(e) => {
                tracing::trace!("Login status check failed, assuming logged out: {}", e);
                false
            }
        }
    }

    /// Fetches the provider login page URL (`data` is a string).
    pub async fn get_login_url(&self) -> Result<RawResponse, AuthError> {
        self.transport
            .send(HttpMethod::Get, &self.config.redirect_url_url())
            .await
    }

    /// Exchanges the callback `code` and `state` for a backend session.
    ///
    /// `data` is the identity payload to persist.
    pub async fn sign_in(
        &self,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Result<RawResponse, AuthError> {
        self.transport
            .send(HttpMethod::Post, &self.config.sign_in_url(code, state))
            .await
    }

    /// Ends the backend session (`data.logoutUrl` is the provider logout page).
    pub async fn sign_out(&self) -> Result<RawResponse, AuthError> {
        self.transport
            .send(HttpMethod::Post, &self.config.sign_out_url())
            .await
    }

    pub async fn uap_login_status(&self) -> Result<RawResponse, AuthError> {
        self.transport
            .send(HttpMethod::Get, &self.config.uap_login_status_url())
            .await
    }

    pub async fn uap_logout(&self) -> Result<RawResponse, AuthError> {
        self.transport
            .send(HttpMethod::Post, &self.config.uap_logout_url())
            .await
    }

    /// Fetches the alternate provider user and tags telemetry with it.
    ///
    /// The body is the user object itself, not an envelope. Telemetry is only
    /// touched when the body is non-empty.
    pub async fn uap_user_info(&self) -> Result<RawResponse, AuthError> {
        let response = self
            .transport
            .send(HttpMethod::Get, &self.config.uap_user_info_url())
            .await?;

        if response.has_body() {
            let user = UserInfo::from(&response.data);
            self.telemetry.set_user(TelemetryUser::from(&user));
        }

        Ok(response)
    }
}
