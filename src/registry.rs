//! The translation registry that receives the derived configuration.
//!
//! [`crate::LocaleInit::load`] is the only writer. Hosts that already own a
//! translation registry implement [`LocaleRegistry`] for it; everything else
//! can use [`MemoryRegistry`].

use crate::code::LocaleCode;
use crate::fallbacks::FallbackMap;
use camino::{Utf8Path, Utf8PathBuf};

/// Write interface of a translation registry.
pub trait LocaleRegistry {
    /// Set the registry default locale.
    fn set_default_locale(&mut self, code: &LocaleCode);

    /// Set the active locale.
    fn set_locale(&mut self, code: &LocaleCode);

    /// Replace the list of available locales.
    fn set_available_locales(&mut self, codes: &[LocaleCode]);

    /// Replace the fallback table.
    fn set_fallbacks(&mut self, fallbacks: &FallbackMap);

    /// Append a translation resource file to the load path.
    fn append_load_path(&mut self, path: &Utf8Path);
}

/// In-memory registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRegistry {
    default_locale: Option<LocaleCode>,
    locale: Option<LocaleCode>,
    available_locales: Vec<LocaleCode>,
    fallbacks: FallbackMap,
    load_path: Vec<Utf8PathBuf>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry default locale.
    #[must_use]
    pub const fn default_locale(&self) -> Option<&LocaleCode> {
        self.default_locale.as_ref()
    }

    /// Active locale.
    #[must_use]
    pub const fn locale(&self) -> Option<&LocaleCode> {
        self.locale.as_ref()
    }

    /// Available locales.
    #[must_use]
    pub fn available_locales(&self) -> &[LocaleCode] {
        &self.available_locales
    }

    /// Fallback table.
    #[must_use]
    pub const fn fallbacks(&self) -> &FallbackMap {
        &self.fallbacks
    }

    /// Fallback chain for `code`; empty when the locale has none.
    #[must_use]
    pub fn fallbacks_for(&self, code: &str) -> &[LocaleCode] {
        self.fallbacks.get(code).map_or(&[][..], Vec::as_slice)
    }

    /// Translation resources appended so far.
    #[must_use]
    pub fn load_path(&self) -> &[Utf8PathBuf] {
        &self.load_path
    }
}

impl LocaleRegistry for MemoryRegistry {
    fn set_default_locale(&mut self, code: &LocaleCode) {
        self.default_locale = Some(code.clone());
    }

    fn set_locale(&mut self, code: &LocaleCode) {
        self.locale = Some(code.clone());
    }

    fn set_available_locales(&mut self, codes: &[LocaleCode]) {
        self.available_locales = codes.to_vec();
    }

    fn set_fallbacks(&mut self, fallbacks: &FallbackMap) {
        self.fallbacks.clone_from(fallbacks);
    }

    fn append_load_path(&mut self, path: &Utf8Path) {
        if !self.load_path.iter().any(|known| known.as_path() == path) {
            self.load_path.push(path.to_owned());
        }
    }
}
