//! Authentication: session identity, credentials, and the session store.
//!
//! The backend authenticates with a session cookie. The transport keeps the
//! cookie in its jar; nothing in this module ever sees it. [`SessionStore`]
//! owns the only copy of the signed-in [`Session`] and is the single place
//! that decides whether the client is authenticated.

pub mod store;

pub use store::{NavbarState, SessionSnapshot, SessionStatus, SessionStore};

use crate::shared::serde_util;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Session
// ============================================================================

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    /// Login identity.
    pub username: String,
    pub display_name: String,
    pub balance: Decimal,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<AccountResponse> for Session {
    fn from(source: AccountResponse) -> Self {
        Session {
            id: source.id,
            display_name: source.username.clone(),
            username: source.username,
            balance: source.balance,
            created_at: source.created_at,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Outcome of login or register. Failures carry a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Ok,
    Failed { error: String },
}

impl AuthResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, AuthResult::Ok)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthResult::Ok => None,
            AuthResult::Failed { error } => Some(error),
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Response from `GET account`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    #[serde(with = "serde_util::decimal")]
    pub balance: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Form-encoded login body.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// JSON registration body.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
