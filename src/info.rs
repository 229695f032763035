//! Reports over the loaded configuration.

use crate::code::LocaleCode;
use crate::init::LoadedState;
use itertools::Itertools;

fn code_width<'a>(codes: impl Iterator<Item = &'a LocaleCode>) -> usize {
    codes.map(|code| code.as_str().chars().count()).max().unwrap_or(0)
}

impl LoadedState {
    /// One `- <code> (<name>)` line per available locale, sorted by code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locale_init::{LocaleInit, MemoryRegistry};
    ///
    /// let mut init = LocaleInit::new();
    /// init.ignore_settings_file();
    /// init.available_locale([("pl", "Polski"), ("en", "English")]);
    /// let state = init.load(&mut MemoryRegistry::new());
    /// assert_eq!(state.list_available_locales(), ["- en (English)", "- pl (Polski)"]);
    /// ```
    #[must_use]
    pub fn list_available_locales(&self) -> Vec<String> {
        let width = code_width(self.available.keys());
        self.available
            .iter()
            .sorted_by(|left, right| left.0.cmp(right.0))
            .map(|(code, name)| format!("- {:<width$} ({name})", code.as_str()))
            .collect()
    }

    /// One `- <code> -> a -> b` line per locale, sorted by code.
    #[must_use]
    pub fn list_fallbacks(&self) -> Vec<String> {
        let width = code_width(self.fallbacks.keys());
        self.fallbacks
            .iter()
            .sorted_by(|left, right| left.0.cmp(right.0))
            .map(|(code, chain)| {
                let mut line = format!("- {:<width$}", code.as_str());
                for step in chain {
                    line.push_str(" -> ");
                    line.push_str(step.as_str());
                }
                line
            })
            .collect()
    }

    /// `(name, code)` pairs sorted by name, ignoring case.
    #[must_use]
    pub fn languages_for_forms(&self) -> Vec<(String, LocaleCode)> {
        self.available
            .iter()
            .map(|(code, name)| (name.clone(), code.clone()))
            .sorted_by_cached_key(|(name, _)| name.to_lowercase())
            .collect()
    }

    /// Names of the available locales, in configuration order.
    #[must_use]
    pub fn available_language_names(&self) -> Vec<&str> {
        self.available.values().map(String::as_str).collect()
    }

    /// Name of the active locale.
    #[must_use]
    pub fn language_name(&self) -> &str {
        self.available
            .get(&self.locale)
            .map_or_else(|| self.locale.as_str(), String::as_str)
    }

    /// Name of the default locale.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_name
    }

    /// Return `true` when `code` is an available locale.
    #[must_use]
    pub fn is_locale_available(&self, code: &str) -> bool {
        self.available.contains_key(code)
    }

    /// Return `true` when `code` is the default locale.
    #[must_use]
    pub fn is_locale_default(&self, code: &str) -> bool {
        self.default_locale.as_str() == code
    }
}
