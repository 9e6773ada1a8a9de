//! # Session Commands
//!
//! Sign-in gate for the cart view. An email is all it takes; nothing is
//! persisted past the process.

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{SessionState, SessionUser};
use techstore_core::validation::validate_email;

/// Signs in with an email address, replacing any current user.
pub fn login(session: &SessionState, email: &str) -> Result<SessionUser, ApiError> {
    debug!("login command");

    let email = validate_email(email)?;
    let user = session.sign_in(email);

    info!(session_id = %session.id(), email = %user.email, "signed in");
    Ok(user)
}

/// Signs out. Returns the user that was signed in, if any.
pub fn logout(session: &SessionState) -> Option<SessionUser> {
    debug!("logout command");

    let user = session.sign_out();
    if let Some(user) = &user {
        info!(session_id = %session.id(), email = %user.email, "signed out");
    }
    user
}

pub fn current_user(session: &SessionState) -> Option<SessionUser> {
    debug!("current_user command");
    session.user()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_login_trims_and_records() {
        let session = SessionState::new();

        let user = login(&session, "  shopper@example.com ").unwrap();
        assert_eq!(user.email, "shopper@example.com");
        assert_eq!(current_user(&session), Some(user));
    }

    #[test]
    fn test_login_rejects_bad_email() {
        let session = SessionState::new();

        for email in ["", "shopper", "shopper@localhost", "a b@example.com"] {
            let err = login(&session, email).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "{email:?}");
        }
        assert!(current_user(&session).is_none());
    }

    #[test]
    fn test_logout() {
        let session = SessionState::new();
        assert!(logout(&session).is_none());

        login(&session, "shopper@example.com").unwrap();
        assert_eq!(logout(&session).map(|u| u.email).as_deref(), Some("shopper@example.com"));
        assert!(current_user(&session).is_none());
    }
}
