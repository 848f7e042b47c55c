//! Display preference commands. These work signed in or not, like the
//! header toggles on the login screen.

use serde::Serialize;
use tracing::debug;

use stockroom_core::{Language, TextDirection};

use crate::error::ApiError;
use crate::state::PreferencesState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDto {
    pub dark_mode: bool,
    pub language: Language,
    pub direction: TextDirection,
}

pub fn get_preferences(prefs: &PreferencesState) -> PreferencesDto {
    prefs.with_prefs(|p| PreferencesDto {
        dark_mode: p.dark_mode(),
        language: p.language(),
        direction: p.direction(),
    })
}

/// Flips dark mode and returns the new settings.
pub fn toggle_dark_mode(prefs: &PreferencesState) -> Result<PreferencesDto, ApiError> {
    let enabled = prefs.with_prefs_mut(|p| p.toggle_dark_mode())?;
    debug!(dark_mode = enabled, "toggle_dark_mode command");
    Ok(get_preferences(prefs))
}

/// Switches language; text direction follows.
pub fn switch_language(
    prefs: &PreferencesState,
    language: Language,
) -> Result<PreferencesDto, ApiError> {
    debug!(language = %language, "switch_language command");
    prefs.with_prefs_mut(|p| p.switch_language(language))?;
    Ok(get_preferences(prefs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_states;

    #[test]
    fn test_defaults_to_hebrew_rtl() {
        let (_, _, prefs) = test_states();
        let dto = get_preferences(&prefs);
        assert_eq!(dto.language, Language::He);
        assert_eq!(dto.direction, TextDirection::Rtl);
        assert!(!dto.dark_mode);
    }

    #[test]
    fn test_toggle_and_switch() {
        let (_, _, prefs) = test_states();
        assert!(toggle_dark_mode(&prefs).unwrap().dark_mode);
        assert!(!toggle_dark_mode(&prefs).unwrap().dark_mode);

        let dto = switch_language(&prefs, Language::En).unwrap();
        assert_eq!(dto.direction, TextDirection::Ltr);
    }
}
