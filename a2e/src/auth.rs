//! Consumer token acquisition types.
//!
//! Used with `POST /api/v1/open/platform/get_user_token`. The consumer token
//! in [`AuthResult`] is passed to every subsequent execution; refreshing it
//! before `expires_in` elapses is the caller's job.

use serde::{Deserialize, Serialize};

/// Token request. Serialized verbatim as `{"auth_type", "auth_code"}`.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Authentication method tag (see the protocol document's auth methods).
    pub auth_type: String,
    /// Opaque authorization code obtained out of band.
    pub auth_code: String,
}

impl AuthRequest {
    /// Creates a token request.
    #[must_use]
    pub fn new(auth_type: impl Into<String>, auth_code: impl Into<String>) -> Self {
        Self {
            auth_type: auth_type.into(),
            auth_code: auth_code.into(),
        }
    }
}

impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest")
            .field("auth_type", &self.auth_type)
            .finish_non_exhaustive()
    }
}

/// Token response.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthResult {
    /// Bearer-style consumer token.
    pub consumer_token: String,
    /// Validity in seconds.
    pub expires_in: u64,
    /// Minimal profile of the user the token acts for.
    pub user_info: UserInfo,
}

impl AuthResult {
    /// Returns the token validity as a [`std::time::Duration`].
    #[must_use]
    pub const fn expires_after(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.expires_in)
    }
}

impl std::fmt::Debug for AuthResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResult")
            .field("consumer_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("user_info", &self.user_info)
            .finish()
    }
}

/// Minimal user profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    /// Display name.
    pub nickname: String,
    /// Avatar URL.
    pub avatar: String,
}
