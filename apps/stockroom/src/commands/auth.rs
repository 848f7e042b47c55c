//! # Auth Commands
//!
//! Login, logout, and the route guards the other commands lean on.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login ──► Session::login ──► InventoryStore::set_actor(email)          │
//! │  logout ─► Session::logout ─► InventoryStore::set_actor("Current User") │
//! │                                                                         │
//! │  require_user   ──► Route::Dashboard guard (any signed-in user)        │
//! │  require_admin  ──► Route::Admin guard     (admin role only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use stockroom_core::{Route, Translator, User, DEFAULT_ACTOR};

use crate::error::ApiError;
use crate::state::{InventoryState, SessionState};

/// Returns the signed-in user, or `UNAUTHORIZED`.
pub fn require_user(session: &SessionState) -> Result<User, ApiError> {
    let user = session.current_user();
    Route::Dashboard.check_access(user.as_ref())?;
    user.ok_or_else(|| ApiError::unauthorized("Not signed in"))
}

/// Returns the signed-in admin, or `UNAUTHORIZED` / `FORBIDDEN`.
pub fn require_admin(session: &SessionState) -> Result<User, ApiError> {
    let user = session.current_user();
    Route::Admin.check_access(user.as_ref())?;
    user.ok_or_else(|| ApiError::unauthorized("Not signed in"))
}

/// Signs in and stamps later history entries with the user's email.
///
/// Wrong credentials give `UNAUTHORIZED` with the translated message.
pub fn login(
    session: &SessionState,
    inventory: &InventoryState,
    translator: &Translator,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    debug!(email = %email, "login command");

    let user = session
        .with_session_mut(|s| s.login(email.trim(), password))?
        .ok_or_else(|| ApiError::unauthorized(translator.t("login.invalid")))?;

    inventory.with_store_mut(|store| store.set_actor(user.email.clone()));
    info!(email = %user.email, role = %user.role, "User logged in");
    Ok(user)
}

pub fn logout(session: &SessionState, inventory: &InventoryState) -> Result<(), ApiError> {
    debug!("logout command");
    session.with_session_mut(|s| s.logout())?;
    inventory.with_store_mut(|store| store.set_actor(DEFAULT_ACTOR));
    Ok(())
}

pub fn current_user(session: &SessionState) -> Option<User> {
    session.current_user()
}

/// Resolves `path` and checks the current user may open it.
pub fn open_route(session: &SessionState, path: &str) -> Result<Route, ApiError> {
    let route = Route::resolve(path);
    route.check_access(session.current_user().as_ref())?;
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_states;
    use crate::error::ErrorCode;
    use stockroom_core::{Language, Role};

    #[test]
    fn test_login_sets_actor() {
        let (inventory, session, _) = test_states();
        let en = Translator::new(Language::En);

        let user = login(&session, &inventory, &en, "admin@example.com", "admin123").unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(inventory.with_store(|s| s.actor().to_string()), "admin@example.com");

        logout(&session, &inventory).unwrap();
        assert_eq!(inventory.with_store(|s| s.actor().to_string()), DEFAULT_ACTOR);
        assert!(current_user(&session).is_none());
    }

    #[test]
    fn test_bad_login_is_translated() {
        let (inventory, session, _) = test_states();
        let err = login(
            &session,
            &inventory,
            &Translator::new(Language::En),
            "admin@example.com",
            "nope",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[test]
    fn test_guards() {
        let (inventory, session, _) = test_states();
        let en = Translator::new(Language::En);

        assert_eq!(require_user(&session).unwrap_err().code, ErrorCode::Unauthorized);
        assert_eq!(open_route(&session, "login").unwrap(), Route::Login);

        login(&session, &inventory, &en, "tech@example.com", "tech123").unwrap();
        assert!(require_user(&session).is_ok());
        assert_eq!(require_admin(&session).unwrap_err().code, ErrorCode::Forbidden);
        assert_eq!(open_route(&session, "/").unwrap(), Route::Dashboard);
        assert!(open_route(&session, "admin").is_err());
    }
}
