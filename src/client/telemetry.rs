//! Fire-and-forget telemetry tagging.
//!
//! The surrounding application reports errors to its own telemetry service.
//! This crate only tells it who the current user is.

use serde::{Deserialize, Serialize};

use crate::UserInfo;

/// User identity attached to telemetry events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl From<&UserInfo> for TelemetryUser {
    fn from(user: &UserInfo) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            username: user.login_name.clone(),
        }
    }
}

/// Receives the current user. Must not fail or block.
pub trait TelemetrySink {
    fn set_user(&self, user: TelemetryUser);
}

/// Default sink: records the user as a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn set_user(&self, user: TelemetryUser) {
        tracing::info!(
            user.id = user.id.as_deref().unwrap_or_default(),
            user.email = user.email.as_deref().unwrap_or_default(),
            user.username = user.username.as_deref().unwrap_or_default(),
            "Telemetry user set"
        );
    }
}
