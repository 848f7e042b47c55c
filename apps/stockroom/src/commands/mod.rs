//! # App Commands
//!
//! Everything the UI (today: the line shell) can ask the backend to do.
//!
//! ## Command Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shell line ──► commands::x(&states…, args) ──► Result<Dto, ApiError>  │
//! │                        │                                                │
//! │                        ├── require_user / require_admin                 │
//! │                        ├── validation (stockroom-core)                  │
//! │                        └── with_store_mut(|store| …)  (stockroom-store) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take the states they need by reference, so each one documents
//! its own dependencies in its signature.

pub mod auth;
pub mod category;
pub mod export;
pub mod history;
pub mod inventory;
pub mod preferences;

#[cfg(test)]
pub(crate) fn test_states() -> (
    crate::state::InventoryState,
    crate::state::SessionState,
    crate::state::PreferencesState,
) {
    use std::sync::Arc;
    use stockroom_store::MemoryStorage;

    let storage: crate::state::SharedStorage = Arc::new(MemoryStorage::new());
    (
        crate::state::InventoryState::load(storage.clone()).unwrap(),
        crate::state::SessionState::load(storage.clone()).unwrap(),
        crate::state::PreferencesState::load(storage, None).unwrap(),
    )
}

#[cfg(test)]
pub(crate) fn signed_in_states(
    email: &str,
    password: &str,
) -> (
    crate::state::InventoryState,
    crate::state::SessionState,
    crate::state::PreferencesState,
) {
    let (inventory, session, prefs) = test_states();
    let translator = prefs.with_prefs(|p| p.translator());
    auth::login(&session, &inventory, &translator, email, password).unwrap();
    (inventory, session, prefs)
}
