//! # Session and Preference State
//!
//! Two small mutex-guarded wrappers: who is signed in, and how the UI looks.
//! They are kept apart from the inventory so that a command holding one lock
//! never needs another at the same time.

use std::sync::Mutex;

use stockroom_core::User;
use stockroom_store::{Preferences, Session, StoreResult};

use super::SharedStorage;

/// Signed-in user.
pub struct SessionState {
    session: Mutex<Session<SharedStorage>>,
}

impl SessionState {
    /// Restores the saved session from `storage`.
    pub fn load(storage: SharedStorage) -> StoreResult<Self> {
        Ok(SessionState {
            session: Mutex::new(Session::load(storage)?),
        })
    }

    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session<SharedStorage>) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session<SharedStorage>) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }

    /// Shorthand for the current user.
    pub fn current_user(&self) -> Option<User> {
        self.with_session(|s| s.current_user())
    }
}

/// Dark mode and language.
pub struct PreferencesState {
    prefs: Mutex<Preferences<SharedStorage>>,
}

impl PreferencesState {
    /// Loads saved preferences; `locale` is used when no language is saved.
    pub fn load(storage: SharedStorage, locale: Option<&str>) -> StoreResult<Self> {
        Ok(PreferencesState {
            prefs: Mutex::new(Preferences::load(storage, locale)?),
        })
    }

    pub fn with_prefs<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Preferences<SharedStorage>) -> R,
    {
        let prefs = self.prefs.lock().expect("Preferences mutex poisoned");
        f(&prefs)
    }

    pub fn with_prefs_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Preferences<SharedStorage>) -> R,
    {
        let mut prefs = self.prefs.lock().expect("Preferences mutex poisoned");
        f(&mut prefs)
    }
}
