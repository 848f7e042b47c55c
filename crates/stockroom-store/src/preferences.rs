//! # Preferences
//!
//! Dark mode and UI language. Dark mode is stored under `darkMode` as the
//! strings `"true"` / `"false"`; the language under `language` as its code.
//!
//! Language resolution on load: saved choice, then the detected locale,
//! then Hebrew.

use tracing::{debug, warn};

use stockroom_core::{Language, TextDirection, Translator};

use crate::error::StoreResult;
use crate::storage::{keys, LocalStorage};

/// Persisted display preferences.
#[derive(Debug)]
pub struct Preferences<S: LocalStorage> {
    storage: S,
    dark_mode: bool,
    language: Language,
}

impl<S: LocalStorage> Preferences<S> {
    /// Loads saved preferences. `locale` is the system locale, if known.
    pub fn load(storage: S, locale: Option<&str>) -> StoreResult<Self> {
        let dark_mode = storage.get_item(keys::DARK_MODE)?.as_deref() == Some("true");

        let saved = storage.get_item(keys::LANGUAGE)?;
        let language = match saved.as_deref().map(str::parse::<Language>) {
            Some(Ok(language)) => language,
            Some(Err(e)) => {
                warn!(error = %e, "Saved language is unreadable, detecting instead");
                Language::detect(locale)
            }
            None => Language::detect(locale),
        };

        debug!(dark_mode, language = %language, "Loaded preferences");
        Ok(Preferences {
            storage,
            dark_mode,
            language,
        })
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> StoreResult<()> {
        self.storage
            .set_item(keys::DARK_MODE, if enabled { "true" } else { "false" })?;
        self.dark_mode = enabled;
        debug!(dark_mode = enabled, "Dark mode changed");
        Ok(())
    }

    /// Flips dark mode and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> StoreResult<bool> {
        self.set_dark_mode(!self.dark_mode)?;
        Ok(self.dark_mode)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.language)
    }

    /// Switches the UI language and saves the choice.
    pub fn switch_language(&mut self, language: Language) -> StoreResult<()> {
        self.storage.set_item(keys::LANGUAGE, language.code())?;
        self.language = language;
        debug!(language = %language, direction = %language.direction(), "Language switched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::load(MemoryStorage::new(), None).unwrap();
        assert!(!prefs.dark_mode());
        assert_eq!(prefs.language(), Language::He);
        assert_eq!(prefs.direction(), TextDirection::Rtl);
    }

    #[test]
    fn test_dark_mode_round_trip() {
        let storage = MemoryStorage::new();
        let mut prefs = Preferences::load(storage.clone(), None).unwrap();

        assert!(prefs.toggle_dark_mode().unwrap());
        assert_eq!(storage.get_item(keys::DARK_MODE).unwrap().as_deref(), Some("true"));
        assert!(Preferences::load(storage.clone(), None).unwrap().dark_mode());

        assert!(!prefs.toggle_dark_mode().unwrap());
        assert_eq!(storage.get_item(keys::DARK_MODE).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_detected_locale_used_until_saved() {
        let storage = MemoryStorage::new();
        let mut prefs = Preferences::load(storage.clone(), Some("en_GB.UTF-8")).unwrap();
        assert_eq!(prefs.direction(), TextDirection::Ltr);

        prefs.switch_language(Language::He).unwrap();
        let reloaded = Preferences::load(storage, Some("en_GB.UTF-8")).unwrap();
        assert_eq!(reloaded.language(), Language::He);
    }

    #[test]
    fn test_garbage_language_falls_back() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::LANGUAGE, "klingon").unwrap();
        let prefs = Preferences::load(storage, None).unwrap();
        assert_eq!(prefs.language(), Language::He);
    }
}
