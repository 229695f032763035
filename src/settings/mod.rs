//! Settings documents and the aggregator that serves them.
//!
//! A settings document is a YAML mapping with the recognised keys
//! `available`, `default`, `names`, `fallbacks`, `default_fallbacks` and
//! `rtl`. Documents are parsed into JSON values first (see [`SettingsMap`]),
//! optionally narrowed to an environment section, and only then typed into a
//! [`SettingsDoc`] one key at a time. A recognised key with the wrong shape
//! is logged and skipped; the remaining keys still load.
//!
//! ```yaml
//! available:
//!   en: English
//!   pl: Polski
//! default: pl
//! fallbacks:
//!   pl: [en]
//! rtl: [ar, he]
//! production:
//!   default: en
//! ```

mod aggregator;
mod error;
mod load;

pub use aggregator::{FileOrigin, SettingsAggregator};
pub use error::SettingsError;
pub use load::{DEFAULT_CONFIG_FILE, parse_settings, read_settings, select_environment};

use crate::code::{LocaleCode, normalize_codes, present_name};
use crate::fallbacks::FallbackMap;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// JSON representation of a settings node after YAML parsing.
pub type SettingsValue = serde_json::Value;
/// JSON object mapping top-level settings keys to values.
pub type SettingsMap = serde_json::Map<String, SettingsValue>;

/// Top-level key marking a document as an unmodified copy of the bundled
/// defaults.
pub const BUNDLED_MARKER_KEY: &str = "locale_init_bundled";

/// Bundled defaults shipped with the library.
pub const BUNDLED_SETTINGS: &str = include_str!("../../assets/locale.yml");

pub(crate) static EMPTY_SETTINGS: LazyLock<SettingsDoc> = LazyLock::new(SettingsDoc::default);

/// A single code, a list of codes, or nothing.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CodeOrList {
    /// No value provided.
    #[default]
    Empty,
    /// A single code.
    Code(String),
    /// A list of codes.
    List(Vec<String>),
}

impl CodeOrList {
    /// Normalize into a deduplicated list of codes.
    #[must_use]
    pub fn into_codes(self) -> Vec<LocaleCode> {
        match self {
            Self::Empty => Vec::new(),
            Self::Code(code) => normalize_codes([code]),
            Self::List(codes) => normalize_codes(codes),
        }
    }
}

/// The `available` key: a code to name mapping, a list of codes, or a
/// single code.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(untagged)]
enum AvailableSpec {
    #[default]
    Empty,
    Map(IndexMap<String, Option<String>>),
    List(Vec<String>),
    Code(String),
}

impl AvailableSpec {
    fn into_entries(self) -> IndexMap<LocaleCode, Option<String>> {
        match self {
            Self::Empty => IndexMap::new(),
            Self::Map(map) => map
                .into_iter()
                .filter_map(|(code, name)| {
                    LocaleCode::new(code).map(|parsed| (parsed, present_name(name.as_deref())))
                })
                .collect(),
            Self::List(codes) => normalize_codes(codes)
                .into_iter()
                .map(|code| (code, None))
                .collect(),
            Self::Code(code) => normalize_codes([code])
                .into_iter()
                .map(|parsed| (parsed, None))
                .collect(),
        }
    }
}

/// Render scalars as text so that numeric codes and names survive typing.
fn scalars_to_text(value: &SettingsValue) -> SettingsValue {
    match value {
        SettingsValue::Bool(flag) => SettingsValue::String(flag.to_string()),
        SettingsValue::Number(number) => SettingsValue::String(number.to_string()),
        SettingsValue::Array(items) => items.iter().map(scalars_to_text).collect(),
        SettingsValue::Object(entries) => SettingsValue::Object(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), scalars_to_text(item)))
                .collect(),
        ),
        SettingsValue::Null | SettingsValue::String(_) => value.clone(),
    }
}

/// Type one recognised key of `map`; a missing, null or malformed value
/// yields the default and leaves the other keys untouched.
fn typed_key<T>(map: &SettingsMap, key: &str, source: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(value) = map.get(key).filter(|value| !value.is_null()) else {
        return T::default();
    };
    serde_json::from_value(scalars_to_text(value)).unwrap_or_else(|err| {
        tracing::warn!(source, key, error = %err, "ignoring malformed settings key");
        T::default()
    })
}

/// Typed view over one settings source.
///
/// # Examples
///
/// ```rust
/// use locale_init::settings::{SettingsDoc, parse_settings};
///
/// let map = parse_settings("available:\n  en: English\ndefault: en\n", "inline")
///     .expect("valid YAML");
/// let doc = SettingsDoc::from_map(map, "inline");
/// assert_eq!(doc.default_locale().map(|c| c.as_str()), Some("en"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDoc {
    raw: SettingsMap,
    available: IndexMap<LocaleCode, Option<String>>,
    default_locale: Option<LocaleCode>,
    names: IndexMap<LocaleCode, String>,
    fallbacks: FallbackMap,
    default_fallbacks: Vec<LocaleCode>,
    rtl: Vec<LocaleCode>,
    bundled_copy: bool,
}

impl SettingsDoc {
    /// Type the recognised keys of `map`.
    ///
    /// Each key is typed on its own: a malformed key is logged and treated
    /// as absent. `source` names the document in log output.
    #[must_use]
    pub fn from_map(map: SettingsMap, source: &str) -> Self {
        let available: AvailableSpec = typed_key(&map, "available", source);
        let default_locale: Option<String> = typed_key(&map, "default", source);
        let names: IndexMap<String, Option<String>> = typed_key(&map, "names", source);
        let fallbacks: IndexMap<String, CodeOrList> = typed_key(&map, "fallbacks", source);
        let default_fallbacks: CodeOrList = typed_key(&map, "default_fallbacks", source);
        let rtl: CodeOrList = typed_key(&map, "rtl", source);
        let bundled_copy = map
            .get(BUNDLED_MARKER_KEY)
            .and_then(SettingsValue::as_bool)
            .unwrap_or(false);

        let names = names
            .into_iter()
            .filter_map(|(code, name)| {
                let parsed = LocaleCode::new(code)?;
                present_name(name.as_deref()).map(|value| (parsed, value))
            })
            .collect();
        let fallbacks = fallbacks
            .into_iter()
            .filter_map(|(code, chain)| LocaleCode::new(code).map(|key| (key, chain.into_codes())))
            .collect();
        Self {
            raw: map,
            available: available.into_entries(),
            default_locale: default_locale.and_then(LocaleCode::new),
            names,
            fallbacks,
            default_fallbacks: default_fallbacks.into_codes(),
            rtl: rtl.into_codes(),
            bundled_copy,
        }
    }

    /// Return `true` when the source had no top-level keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Raw mapping this view was built from.
    #[must_use]
    pub const fn raw(&self) -> &SettingsMap {
        &self.raw
    }

    /// Locales declared under `available`, with optional names.
    #[must_use]
    pub const fn available(&self) -> &IndexMap<LocaleCode, Option<String>> {
        &self.available
    }

    /// Locale declared under `default`.
    #[must_use]
    pub const fn default_locale(&self) -> Option<&LocaleCode> {
        self.default_locale.as_ref()
    }

    /// Names declared under `names`.
    #[must_use]
    pub const fn names(&self) -> &IndexMap<LocaleCode, String> {
        &self.names
    }

    /// Fallback chains declared under `fallbacks`.
    #[must_use]
    pub const fn fallbacks(&self) -> &FallbackMap {
        &self.fallbacks
    }

    /// Locales declared under `default_fallbacks`.
    #[must_use]
    pub fn default_fallbacks(&self) -> &[LocaleCode] {
        &self.default_fallbacks
    }

    /// Locales declared under `rtl`.
    #[must_use]
    pub fn rtl(&self) -> &[LocaleCode] {
        &self.rtl
    }

    /// Return `true` when the document carries the bundled marker.
    #[must_use]
    pub const fn is_bundled_copy(&self) -> bool {
        self.bundled_copy
    }

    /// Every code/name pair this document contributes to name resolution:
    /// named `available` entries first, then the `names` mapping.
    pub fn name_pairs(&self) -> impl Iterator<Item = (&LocaleCode, &str)> {
        self.available
            .iter()
            .filter_map(|(code, name)| name.as_deref().map(|value| (code, value)))
            .chain(self.names.iter().map(|(code, name)| (code, name.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn doc(yaml: &str) -> SettingsDoc {
        let map = parse_settings(yaml, "test").expect("parse settings");
        SettingsDoc::from_map(map, "test")
    }

    fn codes(list: &[LocaleCode]) -> Vec<&str> {
        list.iter().map(LocaleCode::as_str).collect()
    }

    #[test]
    fn available_mapping_keeps_order_and_blank_names_are_absent() {
        let parsed = doc("available:\n  pl: Polski\n  en: ''\n  de: ~\n");
        let entries: Vec<(&str, Option<&str>)> = parsed
            .available()
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_deref()))
            .collect();
        assert_eq!(
            entries,
            vec![("pl", Some("Polski")), ("en", None), ("de", None)]
        );
    }

    #[rstest]
    #[case("available: [en, pl, en]\n", vec!["en", "pl"])]
    #[case("available: de\n", vec!["de"])]
    #[case("default: en\n", vec![])]
    fn available_accepts_lists_and_single_codes(#[case] yaml: &str, #[case] expected: Vec<&str>) {
        let parsed = doc(yaml);
        let keys: Vec<&str> = parsed.available().keys().map(LocaleCode::as_str).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn fallback_values_normalize_to_lists() {
        let parsed = doc("fallbacks:\n  pl: en\n  de: [fr, en, fr, '']\n");
        let pl = parsed.fallbacks().get("pl").expect("pl chain");
        let de = parsed.fallbacks().get("de").expect("de chain");
        assert_eq!(codes(pl), vec!["en"]);
        assert_eq!(codes(de), vec!["fr", "en"]);
    }

    #[test]
    fn malformed_key_leaves_other_keys_intact() {
        let parsed = doc("available:\n  en: [not, a, name]\ndefault: pl\nrtl: [he]\n");
        assert!(parsed.available().is_empty());
        assert!(!parsed.is_empty());
        assert_eq!(parsed.default_locale().map(LocaleCode::as_str), Some("pl"));
        assert_eq!(codes(parsed.rtl()), vec!["he"]);
    }

    #[test]
    fn norwegian_code_is_not_a_boolean() {
        let parsed = doc("available: [en, no]\ndefault: no\nfallbacks:\n  nn: no\n");
        let keys: Vec<&str> = parsed.available().keys().map(LocaleCode::as_str).collect();
        assert_eq!(keys, vec!["en", "no"]);
        assert_eq!(parsed.default_locale().map(LocaleCode::as_str), Some("no"));
        let nn = parsed.fallbacks().get("nn").expect("nn chain");
        assert_eq!(codes(nn), vec!["no"]);
    }

    #[test]
    fn numeric_scalars_are_read_as_text() {
        let parsed =
            doc("available:\n  en: English\n  pl: Polski\ndefault: pl\nnames:\n  xx: 2024\n");
        assert_eq!(parsed.available().len(), 2);
        assert_eq!(parsed.default_locale().map(LocaleCode::as_str), Some("pl"));
        assert_eq!(parsed.names().get("xx").map(String::as_str), Some("2024"));
    }

    #[test]
    fn bundled_marker_is_detected() {
        assert!(doc("locale_init_bundled: true\n").is_bundled_copy());
        assert!(!doc("default: en\n").is_bundled_copy());
    }

    #[test]
    fn name_pairs_list_available_before_names() {
        let parsed =
            doc("available:\n  en: English\n  pl: ~\nnames:\n  pl: Polski\n  en: Angielski\n");
        let pairs: Vec<(&str, &str)> = parsed
            .name_pairs()
            .map(|(code, name)| (code.as_str(), name))
            .collect();
        assert_eq!(
            pairs,
            vec![("en", "English"), ("pl", "Polski"), ("en", "Angielski")]
        );
    }

    #[test]
    fn bundled_defaults_parse() {
        let map = parse_settings(BUNDLED_SETTINGS, "bundled").expect("bundled YAML");
        let bundled = SettingsDoc::from_map(map, "bundled");
        assert!(bundled.is_bundled_copy());
        assert_eq!(bundled.default_locale().map(LocaleCode::as_str), Some("en"));
        assert!(bundled.names().contains_key("pl"));
    }
}
