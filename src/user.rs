//! User identity as returned by the backend.
//!
//! The backend proxies Casdoor's user object. Only a handful of fields are
//! read by this crate; everything else is carried through untouched when the
//! identity is persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder shown when no display name is known.
pub const UNKNOWN_USER_NAME: &str = "--";

/// Identity fields read from the backend user object.
///
/// Deserializes from any JSON value: fields of an unexpected type, and
/// non-object values, read as absent. Numeric identifiers are kept as text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct UserInfo {
    /// Backend user identifier
    pub id: Option<String>,

    /// User's email address
    pub email: Option<String>,

    /// Login name used on the Casdoor sign-in form
    pub login_name: Option<String>,

    /// Human readable name shown in the application header
    pub display_name: Option<String>,
}

/// Reads a string or number field as text.
fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl From<&Value> for UserInfo {
    fn from(value: &Value) -> Self {
        Self {
            id: text_field(value, "id"),
            email: text_field(value, "email"),
            login_name: text_field(value, "loginName"),
            display_name: value
                .get("displayName")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

impl From<Value> for UserInfo {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl UserInfo {
    /// Parses a persisted identity blob.
    ///
    /// Never fails: a missing, empty, `null` or corrupt blob yields an empty
    /// `UserInfo`. Fields other than the four read here do not matter.
    ///
    /// # Example
    ///
    /// ```
    /// # use dxcasdoor::UserInfo;
    /// let user = UserInfo::from_persisted(Some(r#"{"id":7,"displayName":"Alice"}"#));
    /// assert_eq!(user.display_name.as_deref(), Some("Alice"));
    /// assert_eq!(UserInfo::from_persisted(Some("{oops")), UserInfo::default());
    /// ```
    pub fn from_persisted(blob: Option<&str>) -> Self {
        let Some(blob) = blob.filter(|b| !b.trim().is_empty()) else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(blob) {
            Ok(value) => Self::from(&value),
            Err(e) => {
                tracing::debug!("Ignoring unreadable persisted user info: {}", e);
                Self::default()
            }
        }
    }

    /// Returns the display name, or `"--"` when it is absent or empty.
    pub fn display_name_or_placeholder(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_USER_NAME)
    }
}
