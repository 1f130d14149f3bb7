use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record kept by the auth service (not the application profile row).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Free-form metadata supplied at sign-up.
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    pub created_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    /// String field from `user_metadata`, ignoring blanks.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.user_metadata
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    /// Unix timestamp (seconds).
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .map(|at| now.timestamp() >= at)
            .unwrap_or(false)
    }
}

/// Sign-up answers with a full session when email confirmation is disabled,
/// and with the bare user otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

impl SignUpResponse {
    pub fn user(&self) -> &AuthUser {
        match self {
            SignUpResponse::Session(session) => &session.user,
            SignUpResponse::User(user) => user,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SignUpResponse::Session(session) => Some(session),
            SignUpResponse::User(_) => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PasswordCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: &'a serde_json::Value,
}

/// Error payload shared by the REST and auth endpoints.
///
/// PostgREST sends `{code, message, details, hint}`; the auth service sends
/// `{code: <http status>, error_code, msg}` or the OAuth `{error, error_description}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub code: Option<serde_json::Value>,
    pub error_code: Option<String>,
    pub message: Option<String>,
    pub msg: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl ErrorBody {
    pub fn code(&self) -> Option<String> {
        if let Some(code) = &self.error_code {
            return Some(code.clone());
        }
        match &self.code {
            Some(serde_json::Value::String(code)) => Some(code.clone()),
            _ => self.error.clone(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
    }
}
