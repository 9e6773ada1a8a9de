//! # Session State
//!
//! The client session: its identity, when it started, and who (if anyone)
//! is signed in. This is the auth gate in front of the cart view. There are
//! no passwords or tokens; signing in just records an email for the
//! lifetime of the process.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Session-scoped identity and sign-in state.
#[derive(Debug)]
pub struct SessionState {
    id: Uuid,
    started_at: DateTime<Utc>,
    user: RwLock<Option<SessionUser>>,
}

impl SessionState {
    /// Starts a new anonymous session.
    pub fn new() -> Self {
        SessionState {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            user: RwLock::new(None),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<SessionUser> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Records `email` as the signed-in user, replacing any previous one.
    /// Callers validate the address first.
    pub fn sign_in(&self, email: String) -> SessionUser {
        let user = SessionUser {
            email,
            signed_in_at: Utc::now(),
        };
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        user
    }

    /// Clears the signed-in user. Returns the user that was signed in.
    pub fn sign_out(&self) -> Option<SessionUser> {
        self.user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_anonymous() {
        let session = SessionState::new();
        assert!(!session.is_signed_in());
        assert!(session.user().is_none());
        assert!(session.started_at() <= Utc::now());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        assert_ne!(SessionState::new().id(), SessionState::new().id());
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = SessionState::new();

        let user = session.sign_in("shopper@example.com".to_string());
        assert_eq!(user.email, "shopper@example.com");
        assert_eq!(session.user(), Some(user.clone()));

        assert_eq!(session.sign_out(), Some(user));
        assert!(!session.is_signed_in());
        assert_eq!(session.sign_out(), None);
    }
}
