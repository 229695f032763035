//! Available locale sets and default locale derivation.
//!
//! [`LocaleBlock`] records what the host sets through the configuration API.
//! [`derive_locales`] combines it with the settings file and the framework
//! configuration into the published [`DerivedLocales`].

use crate::code::{LocaleCode, normalize_codes, present_name};
use crate::framework::FrameworkConfig;
use crate::settings::SettingsDoc;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

/// Locale used when nothing else names a default.
pub const DEFAULT_LOCALE_RESCUE: &str = "en";
/// Name of [`DEFAULT_LOCALE_RESCUE`].
pub const DEFAULT_LOCALE_NAME_RESCUE: &str = "English";

/// Input accepted by [`LocaleBlock::available_locale`].
///
/// Plain codes carry no name and also pick the locale: once any locale has
/// been picked, only picked locales remain available after derivation.
/// Named entries only add or fill names.
///
/// # Examples
///
/// ```rust
/// use locale_init::locales::LocaleEntries;
///
/// let single = LocaleEntries::from("pl");
/// let list = LocaleEntries::from(["en", "pl"]);
/// let named = LocaleEntries::from([("en", "English"), ("pl", "Polski")]);
/// assert!(matches!(single, LocaleEntries::Codes(ref codes) if codes.len() == 1));
/// assert!(matches!(list, LocaleEntries::Codes(ref codes) if codes.len() == 2));
/// assert!(matches!(named, LocaleEntries::Named(ref map) if map.len() == 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleEntries {
    /// Codes without names.
    Codes(Vec<LocaleCode>),
    /// Codes paired with optional names.
    Named(IndexMap<LocaleCode, Option<String>>),
}

impl From<&str> for LocaleEntries {
    fn from(code: &str) -> Self {
        Self::Codes(normalize_codes([code]))
    }
}

impl From<LocaleCode> for LocaleEntries {
    fn from(code: LocaleCode) -> Self {
        Self::Codes(vec![code])
    }
}

impl From<Vec<LocaleCode>> for LocaleEntries {
    fn from(codes: Vec<LocaleCode>) -> Self {
        Self::Codes(codes.into_iter().unique().collect())
    }
}

impl<const N: usize> From<[&str; N]> for LocaleEntries {
    fn from(codes: [&str; N]) -> Self {
        Self::Codes(normalize_codes(codes))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for LocaleEntries {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self::Named(
            pairs
                .into_iter()
                .filter_map(|(code, name)| {
                    LocaleCode::new(code).map(|parsed| (parsed, present_name(Some(name))))
                })
                .collect(),
        )
    }
}

impl From<IndexMap<LocaleCode, Option<String>>> for LocaleEntries {
    fn from(map: IndexMap<LocaleCode, Option<String>>) -> Self {
        Self::Named(
            map.into_iter()
                .map(|(code, name)| (code, present_name(name.as_deref())))
                .collect(),
        )
    }
}

/// Locale settings made through the configuration API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleBlock {
    available: IndexMap<LocaleCode, Option<String>>,
    picked: IndexSet<LocaleCode>,
    excluded: IndexSet<LocaleCode>,
    default_locale: Option<LocaleCode>,
    default_name: Option<String>,
    locale: Option<LocaleCode>,
    rtl: Vec<LocaleCode>,
}

impl LocaleBlock {
    /// Add available locales.
    ///
    /// New codes are inserted with their (possibly absent) name. A code
    /// already present without a name receives the new name. A name that is
    /// already set is never replaced through this call.
    pub fn available_locale(&mut self, entries: impl Into<LocaleEntries>) {
        match entries.into() {
            LocaleEntries::Codes(codes) => {
                for code in codes {
                    self.excluded.shift_remove(&code);
                    self.available.entry(code.clone()).or_insert(None);
                    self.picked.insert(code);
                }
            }
            LocaleEntries::Named(map) => {
                for (code, name) in map {
                    self.excluded.shift_remove(&code);
                    let slot = self.available.entry(code).or_insert(None);
                    if slot.is_none() {
                        *slot = name;
                    }
                }
            }
        }
    }

    /// Remove `code` from the available set and return its name.
    ///
    /// The code stays excluded from derivation, even when another source
    /// declares it, until it is added again.
    pub fn delete_locale(&mut self, code: &LocaleCode) -> Option<String> {
        self.picked.shift_remove(code);
        self.excluded.insert(code.clone());
        self.available.shift_remove(code).flatten()
    }

    /// Locales added through the block.
    #[must_use]
    pub const fn available(&self) -> &IndexMap<LocaleCode, Option<String>> {
        &self.available
    }

    /// Codes picked with plain-code entries.
    #[must_use]
    pub const fn picked(&self) -> &IndexSet<LocaleCode> {
        &self.picked
    }

    /// Set the default locale; without `name` the block's available mapping
    /// is consulted.
    pub fn set_default_locale(&mut self, code: LocaleCode, name: Option<&str>) {
        self.default_name =
            present_name(name).or_else(|| self.available.get(&code).cloned().flatten());
        self.default_locale = Some(code);
    }

    /// Default locale set through the block.
    #[must_use]
    pub const fn default_locale(&self) -> Option<&LocaleCode> {
        self.default_locale.as_ref()
    }

    /// Name of the default locale set through the block.
    #[must_use]
    pub fn default_name(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    /// Set the locale that becomes active on load.
    pub fn set_locale(&mut self, code: LocaleCode) {
        self.locale = Some(code);
    }

    /// Locale requested to become active on load.
    #[must_use]
    pub const fn locale(&self) -> Option<&LocaleCode> {
        self.locale.as_ref()
    }

    /// Add right-to-left locales.
    pub fn add_rtl_locales<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added = normalize_codes(codes);
        let known = std::mem::take(&mut self.rtl);
        self.rtl = known.into_iter().chain(added).unique().collect();
    }

    /// Right-to-left locales set through the block.
    #[must_use]
    pub fn rtl(&self) -> &[LocaleCode] {
        &self.rtl
    }
}

/// Sources consumed by [`derive_locales`].
#[derive(Debug, Clone, Copy)]
pub struct LocaleSources<'a> {
    /// Values set through the configuration API.
    pub block: &'a LocaleBlock,
    /// Settings file view.
    pub file: &'a SettingsDoc,
    /// Framework configuration.
    pub framework: &'a FrameworkConfig,
}

/// Locale state published on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedLocales {
    /// Available locales with their resolved names.
    pub available: IndexMap<LocaleCode, String>,
    /// Default locale.
    pub default_locale: LocaleCode,
    /// Name of the default locale.
    pub default_name: String,
    /// Locale active after load.
    pub locale: LocaleCode,
    /// Right-to-left locales.
    pub rtl: Vec<LocaleCode>,
}

fn merge_entry(
    merged: &mut IndexMap<LocaleCode, Option<String>>,
    code: &LocaleCode,
    name: Option<&str>,
) {
    match present_name(name) {
        Some(value) => {
            merged.insert(code.clone(), Some(value));
        }
        None => {
            merged.entry(code.clone()).or_insert(None);
        }
    }
}

fn merge_available(sources: LocaleSources<'_>) -> IndexMap<LocaleCode, Option<String>> {
    let mut merged = IndexMap::new();
    for code in &sources.framework.available_locales {
        merge_entry(&mut merged, code, None);
    }
    for (code, name) in sources.file.available() {
        merge_entry(&mut merged, code, name.as_deref());
    }
    for (code, name) in sources.block.available() {
        merge_entry(&mut merged, code, name.as_deref());
    }
    merged.retain(|code, _| !sources.block.excluded.contains(code));

    let picked = &sources.block.picked;
    if picked.is_empty() {
        return merged;
    }
    tracing::debug!(picked = picked.len(), "removing unwanted locales");
    picked
        .iter()
        .map(|code| (code.clone(), merged.get(code).cloned().flatten()))
        .collect()
}

fn pick_default(
    sources: LocaleSources<'_>,
    merged: &IndexMap<LocaleCode, Option<String>>,
) -> (LocaleCode, Option<String>) {
    let lookup = |code: &LocaleCode| merged.get(code).cloned().flatten();
    if let Some(code) = sources.block.default_locale() {
        tracing::debug!(locale = %code, "default locale from configuration block");
        let name = sources
            .block
            .default_name()
            .map(str::to_owned)
            .or_else(|| lookup(code));
        return (code.clone(), name);
    }
    let declared = [
        ("configuration file", sources.file.default_locale()),
        ("framework settings", sources.framework.default_locale.as_ref()),
    ];
    for (title, candidate) in declared {
        if let Some(code) = candidate {
            tracing::debug!(locale = %code, source = title, "default locale found");
            return (code.clone(), lookup(code));
        }
    }
    if let Some((code, name)) = merged.first() {
        tracing::debug!(locale = %code, "default locale taken from available locales");
        return (code.clone(), name.clone());
    }
    tracing::debug!("default locale cannot be deduced, using rescue locale");
    (
        LocaleCode::from_static(DEFAULT_LOCALE_RESCUE),
        Some(DEFAULT_LOCALE_NAME_RESCUE.to_owned()),
    )
}

/// Derive available locales, default locale, active locale and rtl list.
///
/// `resolve` supplies a name for every locale that no source named.
#[must_use]
pub fn derive_locales(
    sources: LocaleSources<'_>,
    resolve: impl Fn(&LocaleCode) -> String,
) -> DerivedLocales {
    let mut merged = merge_available(sources);
    let (default_locale, default_name) = pick_default(sources, &merged);

    let slot = merged.entry(default_locale.clone()).or_insert(None);
    if slot.is_none() {
        slot.clone_from(&default_name);
    }

    tracing::debug!("fixing missing locale names");
    let available: IndexMap<LocaleCode, String> = merged
        .into_iter()
        .map(|(code, name)| {
            let resolved = name.unwrap_or_else(|| resolve(&code));
            (code, resolved)
        })
        .collect();

    let default_name = default_name
        .or_else(|| available.get(&default_locale).cloned())
        .unwrap_or_else(|| default_locale.to_string());

    let rtl = sources
        .block
        .rtl()
        .iter()
        .chain(sources.file.rtl())
        .unique()
        .cloned()
        .collect();

    let locale = match sources.block.locale() {
        Some(code) if available.contains_key(code) => code.clone(),
        Some(code) => {
            tracing::warn!(
                locale = %code,
                default = %default_locale,
                "requested locale is not available; activating the default locale"
            );
            default_locale.clone()
        }
        None => default_locale.clone(),
    };

    DerivedLocales {
        available,
        default_locale,
        default_name,
        locale,
        rtl,
    }
}
