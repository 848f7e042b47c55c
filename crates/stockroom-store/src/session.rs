//! # Session
//!
//! The signed-in user, persisted under `currentUser` so a restart keeps the
//! user signed in. Logging out removes the key.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use stockroom_core::auth::authenticate;
use stockroom_core::User;

use crate::error::{StoreError, StoreResult};
use crate::storage::{keys, read_json, write_json, LocalStorage};

/// Current user with change notification.
#[derive(Debug)]
pub struct Session<S: LocalStorage> {
    storage: S,
    user: watch::Sender<Option<User>>,
}

impl<S: LocalStorage> Session<S> {
    /// Restores the saved user, if any. An unreadable record signs out.
    pub fn load(storage: S) -> StoreResult<Self> {
        let user = match read_json::<User>(&storage, keys::CURRENT_USER) {
            Ok(user) => user,
            Err(StoreError::Corrupt { reason, .. }) => {
                warn!(reason = %reason, "Saved user is unreadable, starting signed out");
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(user) = &user {
            info!(email = %user.email, role = %user.role, "Restored session");
        }

        Ok(Session {
            storage,
            user: watch::channel(user).0,
        })
    }

    /// Signs in with the demo credentials.
    ///
    /// Returns `Ok(None)` when the credentials are wrong; the current session
    /// is left as it was.
    pub fn login(&mut self, email: &str, password: &str) -> StoreResult<Option<User>> {
        let Ok(user) = authenticate(email, password) else {
            debug!(email = %email, "Login rejected");
            return Ok(None);
        };

        write_json(&self.storage, keys::CURRENT_USER, &user)?;
        self.user.send_replace(Some(user.clone()));
        info!(email = %user.email, role = %user.role, "Signed in");
        Ok(Some(user))
    }

    pub fn logout(&mut self) -> StoreResult<()> {
        self.storage.remove_item(keys::CURRENT_USER)?;
        if let Some(user) = self.user.send_replace(None) {
            info!(email = %user.email, "Signed out");
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.borrow().as_ref().is_some_and(User::is_admin)
    }

    pub fn is_technician(&self) -> bool {
        self.user.borrow().as_ref().is_some_and(User::is_technician)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use stockroom_core::Role;

    #[test]
    fn test_login_persists_user() {
        let storage = MemoryStorage::new();
        let mut session = Session::load(storage.clone()).unwrap();
        assert!(!session.is_authenticated());

        let user = session.login("admin@example.com", "admin123").unwrap().unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(session.is_admin());
        assert!(!session.is_technician());
        assert_eq!(
            storage.get_item(keys::CURRENT_USER).unwrap().as_deref(),
            Some(r#"{"email":"admin@example.com","role":"admin"}"#)
        );
    }

    #[test]
    fn test_bad_login_keeps_session() {
        let mut session = Session::load(MemoryStorage::new()).unwrap();
        session.login("tech@example.com", "tech123").unwrap();

        assert_eq!(session.login("tech@example.com", "wrong").unwrap(), None);
        assert!(session.is_technician());
    }

    #[test]
    fn test_restore_and_logout() {
        let storage = MemoryStorage::new();
        Session::load(storage.clone())
            .unwrap()
            .login("tech@example.com", "tech123")
            .unwrap();

        let mut restored = Session::load(storage.clone()).unwrap();
        assert_eq!(restored.current_user().unwrap().email, "tech@example.com");

        restored.logout().unwrap();
        assert!(!restored.is_authenticated());
        assert_eq!(storage.get_item(keys::CURRENT_USER).unwrap(), None);
    }

    #[test]
    fn test_corrupt_user_signs_out() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::CURRENT_USER, "{\"email\":1}").unwrap();
        let session = Session::load(storage).unwrap();
        assert!(!session.is_authenticated());
    }
}
