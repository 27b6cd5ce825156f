//! Translations and the persisted language preference.
//!
//! Tables live in `locales/{en,ar}.json` and are compiled into the binary.
//! A missing key translates to itself.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use tracing::{debug, error, warn};

use sts_core::Language;

use crate::store::{KeyValueStore, keys};

type Table = HashMap<String, String>;

fn load_table(language: Language, raw: &str) -> Table {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        error!(language = %language, error = %e, "Failed to parse translation table");
        Table::new()
    })
}

static EN: LazyLock<Table> =
    LazyLock::new(|| load_table(Language::En, include_str!("../../locales/en.json")));
static AR: LazyLock<Table> =
    LazyLock::new(|| load_table(Language::Ar, include_str!("../../locales/ar.json")));

/// The full translation table for `language`.
#[must_use]
pub fn table(language: Language) -> &'static HashMap<String, String> {
    match language {
        Language::En => &EN,
        Language::Ar => &AR,
    }
}

/// Translate `key`, falling back to the key itself.
#[must_use]
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    table(language).get(key).map_or(key, String::as_str)
}

/// Translation bound to one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    language: Language,
}

impl Translator {
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Translate `key`.
    #[must_use]
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.language, key)
    }
}

/// The selected display language, written back to the store on change.
#[derive(Debug, Clone)]
pub struct LanguagePreference {
    store: Arc<dyn KeyValueStore>,
    current: Language,
}

impl LanguagePreference {
    /// Read the stored preference. Missing or unknown values mean English.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let current = match store.get(keys::LANGUAGE) {
            Ok(Some(raw)) => Language::parse(raw.trim()).unwrap_or_else(|| {
                debug!(stored = %raw, "Unknown stored language, using default");
                Language::default()
            }),
            Ok(None) => Language::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read language preference");
                Language::default()
            }
        };
        Self { store, current }
    }

    #[must_use]
    pub const fn current(&self) -> Language {
        self.current
    }

    #[must_use]
    pub const fn translator(&self) -> Translator {
        Translator::new(self.current)
    }

    /// Switch between English and Arabic.
    pub fn toggle(&mut self) -> Language {
        self.set(self.current.toggled());
        self.current
    }

    /// Select `language` and persist it.
    pub fn set(&mut self, language: Language) {
        self.current = language;
        if let Err(e) = self.store.set(keys::LANGUAGE, language.code()) {
            warn!(error = %e, "Failed to persist language preference");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_tables_have_same_keys() {
        let en = table(Language::En);
        let ar = table(Language::Ar);
        assert!(!en.is_empty());
        let mut missing: Vec<&String> = en.keys().filter(|k| !ar.contains_key(*k)).collect();
        missing.sort();
        assert!(missing.is_empty(), "{missing:?}");
        assert_eq!(en.len(), ar.len());
    }

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(translate(Language::En, "cart.title"), "Shopping Cart");
        assert_eq!(translate(Language::Ar, "cart.title"), "سلة التسوق");
        assert_eq!(translate(Language::Ar, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_payment_labels_present() {
        let t = Translator::new(Language::En);
        assert_eq!(t.t("cart.whishMoney"), "Whish Money");
        assert_eq!(t.t("cart.cash"), "Cash on Delivery");
    }

    #[test]
    fn test_preference_round_trip() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut pref = LanguagePreference::load(Arc::clone(&store));
        assert_eq!(pref.current(), Language::En);

        assert_eq!(pref.toggle(), Language::Ar);
        assert_eq!(store.get(keys::LANGUAGE).unwrap().as_deref(), Some("ar"));

        let reloaded = LanguagePreference::load(store);
        assert_eq!(reloaded.current(), Language::Ar);
        assert!(reloaded.current().is_rtl());
    }

    #[test]
    fn test_unknown_stored_language_defaults() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(keys::LANGUAGE, "fr").unwrap();
        assert_eq!(LanguagePreference::load(store).current(), Language::En);
    }
}
