//! # Roles, Credentials and Route Guards
//!
//! Stockroom has two roles. Technicians see the dashboard; admins also get
//! the admin overview.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Route        Guard                     Redirect                        │
//! │  ──────────   ───────────────────────   ─────────────────────────────── │
//! │  ""           -                         → dashboard                     │
//! │  login        -                                                          │
//! │  dashboard    signed in                                                 │
//! │  admin        signed in + admin role                                    │
//! │  anything     -                         → dashboard                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the two demo accounts exist. There is no password storage.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Access level of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Technician,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Technician => write!(f, "technician"),
        }
    }
}

/// The signed-in user, as persisted under `currentUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_technician(&self) -> bool {
        self.role == Role::Technician
    }
}

/// Demo accounts: (email, password, role).
const DEMO_ACCOUNTS: &[(&str, &str, Role)] = &[
    ("admin@example.com", "admin123", Role::Admin),
    ("tech@example.com", "tech123", Role::Technician),
];

/// Checks a login attempt against the demo accounts.
///
/// The email is matched exactly, as typed.
pub fn authenticate(email: &str, password: &str) -> CoreResult<User> {
    DEMO_ACCOUNTS
        .iter()
        .find(|(e, p, _)| *e == email && *p == password)
        .map(|(e, _, role)| User {
            email: e.to_string(),
            role: *role,
        })
        .ok_or(CoreError::InvalidCredentials)
}

// =============================================================================
// Routes
// =============================================================================

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Dashboard,
    Admin,
}

impl Route {
    /// Resolves a path, applying the default and wildcard redirects.
    pub fn resolve(path: &str) -> Route {
        match path.trim().trim_matches('/') {
            "login" => Route::Login,
            "admin" => Route::Admin,
            _ => Route::Dashboard,
        }
    }

    /// Checks whether `user` may open this route.
    pub fn check_access(&self, user: Option<&User>) -> CoreResult<()> {
        match self {
            Route::Login => Ok(()),
            Route::Dashboard => user.map(|_| ()).ok_or(CoreError::Unauthenticated),
            Route::Admin => {
                let user = user.ok_or(CoreError::Unauthenticated)?;
                if user.is_admin() {
                    Ok(())
                } else {
                    Err(CoreError::Forbidden {
                        required: Role::Admin,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_logins() {
        let admin = authenticate("admin@example.com", "admin123").unwrap();
        assert!(admin.is_admin());

        let tech = authenticate("tech@example.com", "tech123").unwrap();
        assert!(tech.is_technician());
    }

    #[test]
    fn test_wrong_password_fails() {
        assert!(matches!(
            authenticate("admin@example.com", "tech123"),
            Err(CoreError::InvalidCredentials)
        ));
        assert!(authenticate("", "").is_err());
    }

    #[test]
    fn test_route_redirects() {
        assert_eq!(Route::resolve(""), Route::Dashboard);
        assert_eq!(Route::resolve("/admin"), Route::Admin);
        assert_eq!(Route::resolve("login"), Route::Login);
        assert_eq!(Route::resolve("reports/2024"), Route::Dashboard);
    }

    #[test]
    fn test_route_guards() {
        let tech = User {
            email: "tech@example.com".to_string(),
            role: Role::Technician,
        };

        assert!(Route::Login.check_access(None).is_ok());
        assert!(matches!(
            Route::Dashboard.check_access(None),
            Err(CoreError::Unauthenticated)
        ));
        assert!(Route::Dashboard.check_access(Some(&tech)).is_ok());
        assert!(matches!(
            Route::Admin.check_access(Some(&tech)),
            Err(CoreError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_user_json_matches_stored_shape() {
        let json = serde_json::to_string(&User {
            email: "admin@example.com".to_string(),
            role: Role::Admin,
        })
        .unwrap();
        assert_eq!(json, r#"{"email":"admin@example.com","role":"admin"}"#);
    }
}
