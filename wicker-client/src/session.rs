//! In-memory session state shared across client surfaces

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::client::UserInfo;

/// Session data held in memory during the client's lifecycle.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// Bearer token for API authentication.
    pub token: Option<String>,
    /// Current user information after login.
    pub user: Option<UserInfo>,
}

/// Cloneable handle to the shared session state.
///
/// The HTTP adapter reads the bearer token from here and the cart
/// synchronizer consults it before every operation. The application signs
/// users in and out through the same handle, so there is a single injected
/// source of session truth instead of an ambient global.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<SessionData>>,
}

impl SessionHandle {
    /// Creates an empty, signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionData> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionData> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a successful login.
    pub fn set_login(&self, token: impl Into<String>, user: UserInfo) {
        let mut data = self.write();
        data.token = Some(token.into());
        data.user = Some(user);
    }

    /// Clears the session on sign-out.
    pub fn clear(&self) {
        let mut data = self.write();
        data.token = None;
        data.user = None;
    }

    /// Returns the bearer token if a session is active.
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    /// Returns the signed-in user, if any.
    pub fn user(&self) -> Option<UserInfo> {
        self.read().user.clone()
    }

    /// Returns the signed-in user's id, if any.
    pub fn user_id(&self) -> Option<String> {
        self.read().user.as_ref().map(|u| u.id.clone())
    }

    /// Whether a user is currently authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
        }
    }

    #[test]
    fn test_login_and_clear() {
        let session = SessionHandle::new();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());

        session.set_login("token-1", user());
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("token-1"));
        assert_eq!(session.user_id().as_deref(), Some("u1"));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionHandle::new();
        let view = session.clone();
        session.set_login("token-2", user());
        assert!(view.is_authenticated());
    }
}
