//! # Translations
//!
//! Hebrew is the default language; English is the alternative. Each language
//! also fixes the text direction the UI lays out with.
//!
//! Lookups fall back from the active language to Hebrew, then to the key
//! itself, so a missing entry shows up as its key rather than as nothing.
//! Placeholders are written `{{name}}`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Language
// =============================================================================

/// UI language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    He,
    En,
}

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Rtl,
    Ltr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::He => "he",
            Language::En => "en",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Language::He => TextDirection::Rtl,
            Language::En => TextDirection::Ltr,
        }
    }

    /// Picks the language from a system locale such as `en_US.UTF-8`.
    ///
    /// Only `en` and `he` are recognised; anything else, or no locale at
    /// all, gives Hebrew.
    pub fn detect(locale: Option<&str>) -> Language {
        let prefix = locale
            .map(|l| l.trim().to_lowercase())
            .unwrap_or_default();
        if prefix.starts_with("en") {
            Language::En
        } else {
            Language::He
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "he" | "heb" | "hebrew" => Ok(Language::He),
            "en" | "eng" | "english" => Ok(Language::En),
            other => Err(format!(
                "Unknown language: '{}'. Valid options: he, en",
                other
            )),
        }
    }
}

impl std::fmt::Display for TextDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextDirection::Rtl => write!(f, "rtl"),
            TextDirection::Ltr => write!(f, "ltr"),
        }
    }
}

// =============================================================================
// Dictionaries
// =============================================================================

const HE: &[(&str, &str)] = &[
    ("app.title", "ניהול מלאי"),
    ("app.darkMode", "מצב כהה"),
    ("app.lightMode", "מצב בהיר"),
    ("app.logout", "התנתקות"),
    ("login.title", "התחברות"),
    ("login.email", "דוא\"ל"),
    ("login.password", "סיסמה"),
    ("login.invalid", "פרטי התחברות שגויים"),
    ("login.required", "יש להתחבר תחילה"),
    ("login.forbidden", "אין הרשאה לצפות בעמוד זה"),
    ("common.cancel", "ביטול"),
    ("common.save", "שמירה"),
    ("common.search", "חיפוש"),
    ("common.pagination.itemsPerPage", "פריטים בעמוד"),
    ("common.pagination.nextPage", "העמוד הבא"),
    ("common.pagination.previousPage", "העמוד הקודם"),
    ("common.pagination.firstPage", "העמוד הראשון"),
    ("common.pagination.lastPage", "העמוד האחרון"),
    ("common.pagination.range", "{{startIndex}} - {{endIndex}} מתוך {{length}}"),
    ("common.pagination.rangeEmpty", "0 מתוך 0"),
    ("inventory.title", "מלאי"),
    ("inventory.view.title", "צפייה במלאי"),
    ("inventory.manage.title", "ניהול מלאי"),
    ("inventory.settings.title", "הגדרות מלאי"),
    ("inventory.dashboard.totalItems", "סה\"כ פריטים"),
    ("inventory.dashboard.lowStock", "מלאי נמוך"),
    ("inventory.dashboard.categories", "קטגוריות"),
    ("inventory.items.add", "הוספת פריט"),
    ("inventory.items.name", "שם פריט"),
    ("inventory.items.category", "קטגוריה"),
    ("inventory.items.currentStock", "מלאי נוכחי"),
    ("inventory.items.idealStock", "מלאי אידיאלי"),
    ("inventory.items.threshold", "סף התראה"),
    ("inventory.items.status", "סטטוס"),
    ("inventory.items.noItems", "אין פריטים"),
    ("inventory.status.ok", "תקין"),
    ("inventory.status.low", "נמוך"),
    ("inventory.categories.add", "הוספת קטגוריה"),
    ("inventory.categories.name", "שם קטגוריה"),
    ("inventory.categories.title", "קטגוריות"),
    ("inventory.categories.itemCount", "מספר פריטים"),
    ("inventory.history.title", "היסטוריה"),
    ("inventory.history.date", "תאריך"),
    ("inventory.history.item", "פריט"),
    ("inventory.history.action", "פעולה"),
    ("inventory.history.quantity", "כמות"),
    ("inventory.history.user", "משתמש"),
    ("inventory.history.export", "ייצוא היסטוריה"),
    ("inventory.history.actions.create", "יצירה"),
    ("inventory.history.actions.update", "עדכון"),
    ("inventory.history.actions.add", "הוספה"),
    ("inventory.history.actions.remove", "הורדה"),
    ("inventory.history.actions.delete", "מחיקה"),
    ("inventory.export.excel", "Excel"),
    ("inventory.export.csv", "CSV"),
    ("inventory.export.current", "ייצוא מלאי נוכחי"),
    ("inventory.export.empty", "אין נתונים לייצוא"),
    ("inventory.admin.title", "לוח בקרה למנהל"),
    ("inventory.admin.inventory", "מלאי"),
    ("inventory.admin.allItems", "כל הפריטים"),
    ("inventory.alerts.success", "הפעולה בוצעה בהצלחה"),
    ("inventory.alerts.lowStock", "מלאי נמוך"),
    ("inventory.alerts.settingsUpdated", "ההגדרות עודכנו"),
];

const EN: &[(&str, &str)] = &[
    ("app.title", "Inventory Management"),
    ("app.darkMode", "Dark mode"),
    ("app.lightMode", "Light mode"),
    ("app.logout", "Log out"),
    ("login.title", "Login"),
    ("login.email", "Email"),
    ("login.password", "Password"),
    ("login.invalid", "Invalid credentials"),
    ("login.required", "Please log in first"),
    ("login.forbidden", "You are not allowed to view this page"),
    ("common.cancel", "Cancel"),
    ("common.save", "Save"),
    ("common.search", "Search"),
    ("common.pagination.itemsPerPage", "Items per page"),
    ("common.pagination.nextPage", "Next page"),
    ("common.pagination.previousPage", "Previous page"),
    ("common.pagination.firstPage", "First page"),
    ("common.pagination.lastPage", "Last page"),
    ("common.pagination.range", "{{startIndex}} - {{endIndex}} of {{length}}"),
    ("common.pagination.rangeEmpty", "0 of 0"),
    ("inventory.title", "Inventory"),
    ("inventory.view.title", "View Inventory"),
    ("inventory.manage.title", "Manage Inventory"),
    ("inventory.settings.title", "Inventory Settings"),
    ("inventory.dashboard.totalItems", "Total Items"),
    ("inventory.dashboard.lowStock", "Low Stock"),
    ("inventory.dashboard.categories", "Categories"),
    ("inventory.items.add", "Add Item"),
    ("inventory.items.name", "Item Name"),
    ("inventory.items.category", "Category"),
    ("inventory.items.currentStock", "Current Stock"),
    ("inventory.items.idealStock", "Ideal Stock"),
    ("inventory.items.threshold", "Threshold"),
    ("inventory.items.status", "Status"),
    ("inventory.items.noItems", "No items"),
    ("inventory.status.ok", "OK"),
    ("inventory.status.low", "Low"),
    ("inventory.categories.add", "Add Category"),
    ("inventory.categories.name", "Category Name"),
    ("inventory.categories.title", "Categories"),
    ("inventory.categories.itemCount", "Item Count"),
    ("inventory.history.title", "History"),
    ("inventory.history.date", "Date"),
    ("inventory.history.item", "Item"),
    ("inventory.history.action", "Action"),
    ("inventory.history.quantity", "Quantity"),
    ("inventory.history.user", "User"),
    ("inventory.history.export", "Export History"),
    ("inventory.history.actions.create", "Created"),
    ("inventory.history.actions.update", "Updated"),
    ("inventory.history.actions.add", "Added"),
    ("inventory.history.actions.remove", "Removed"),
    ("inventory.history.actions.delete", "Deleted"),
    ("inventory.export.excel", "Excel"),
    ("inventory.export.csv", "CSV"),
    ("inventory.export.current", "Export Current Inventory"),
    ("inventory.export.empty", "Nothing to export"),
    ("inventory.admin.title", "Admin Dashboard"),
    ("inventory.admin.inventory", "Inventory"),
    ("inventory.admin.allItems", "All Items"),
    ("inventory.alerts.success", "Saved successfully"),
    ("inventory.alerts.lowStock", "Low stock"),
    ("inventory.alerts.settingsUpdated", "Settings updated"),
];

fn dictionary(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::He => HE,
        Language::En => EN,
    }
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    dictionary(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

// =============================================================================
// Translator
// =============================================================================

/// Resolves translation keys for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Translator { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    /// Translates `key`, falling back to Hebrew and then to the key.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        lookup(self.language, key)
            .or_else(|| lookup(Language::He, key))
            .unwrap_or(key)
    }

    /// Translates `key` and fills `{{name}}` placeholders.
    pub fn t_with(&self, key: &str, params: &[(&str, String)]) -> String {
        params
            .iter()
            .fold(self.t(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{{{}}}}}", name), value)
            })
    }

    /// Paginator range label, e.g. `11 - 20 of 43`.
    pub fn range_label(&self, page: usize, page_size: usize, length: usize) -> String {
        match crate::query::page_range(page, page_size, length) {
            None => self.t("common.pagination.rangeEmpty").to_string(),
            Some(range) => self.t_with(
                "common.pagination.range",
                &[
                    ("startIndex", range.start.to_string()),
                    ("endIndex", range.end.to_string()),
                    ("length", range.length.to_string()),
                ],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_follows_language() {
        assert_eq!(Language::He.direction(), TextDirection::Rtl);
        assert_eq!(Language::En.direction(), TextDirection::Ltr);
        assert_eq!(Language::default(), Language::He);
    }

    #[test]
    fn test_detect() {
        assert_eq!(Language::detect(Some("en_US.UTF-8")), Language::En);
        assert_eq!(Language::detect(Some("he_IL")), Language::He);
        assert_eq!(Language::detect(Some("fr_FR")), Language::He);
        assert_eq!(Language::detect(None), Language::He);
    }

    #[test]
    fn test_lookup_and_fallback() {
        let en = Translator::new(Language::En);
        assert_eq!(en.t("inventory.items.name"), "Item Name");
        assert_eq!(en.t("no.such.key"), "no.such.key");

        let he = Translator::new(Language::He);
        assert_eq!(he.t("inventory.history.actions.add"), "הוספה");
    }

    #[test]
    fn test_dictionaries_have_same_keys() {
        for (key, _) in HE {
            assert!(lookup(Language::En, key).is_some(), "missing en: {}", key);
        }
        for (key, _) in EN {
            assert!(lookup(Language::He, key).is_some(), "missing he: {}", key);
        }
    }

    #[test]
    fn test_interpolation() {
        let en = Translator::new(Language::En);
        let text = en.t_with(
            "common.pagination.range",
            &[
                ("startIndex", "1".to_string()),
                ("endIndex", "10".to_string()),
                ("length", "25".to_string()),
            ],
        );
        assert_eq!(text, "1 - 10 of 25");
    }

    #[test]
    fn test_range_label() {
        let en = Translator::new(Language::En);
        assert_eq!(en.range_label(0, 10, 0), "0 of 0");
        assert_eq!(en.range_label(2, 10, 25), "21 - 25 of 25");
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("de".parse::<Language>().is_err());
    }
}
