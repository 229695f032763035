//! Locale code identifiers and normalization helpers.
//!
//! A [`LocaleCode`] is an opaque, non-blank identifier such as `en` or
//! `pl-PL`. Surrounding whitespace is trimmed; otherwise codes keep the case
//! they were given and compare by exact string equality, so they can be used
//! directly as map keys and looked up by `&str`.

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use std::{borrow::Borrow, fmt};

/// Identifier of a locale, for example `en` or `pt-BR`.
///
/// # Examples
///
/// ```rust
/// use locale_init::LocaleCode;
///
/// let code = LocaleCode::new("pl").expect("non-blank code");
/// assert_eq!(code.as_str(), "pl");
/// assert!(LocaleCode::new("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Build a code from `raw`, trimming surrounding whitespace and
    /// rejecting blank input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let value = raw.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == value.len() {
            Some(Self(value))
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Build a code from a literal known to be non-blank.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        Self(raw.to_owned())
    }

    /// Borrow the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocaleCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LocaleCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).ok_or_else(|| D::Error::custom("locale code must not be blank"))
    }
}

/// Return `Some(name)` unless the name is blank.
pub(crate) fn present_name(name: Option<&str>) -> Option<String> {
    name.filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
}

/// Parse each raw code, dropping blanks and keeping the first occurrence of
/// every duplicate.
///
/// # Examples
///
/// ```rust
/// use locale_init::code::normalize_codes;
///
/// let codes = normalize_codes(["fr", "", "en", "fr"]);
/// let rendered: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
/// assert_eq!(rendered, ["fr", "en"]);
/// ```
pub fn normalize_codes<I, S>(raw: I) -> Vec<LocaleCode>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    raw.into_iter()
        .filter_map(LocaleCode::new)
        .unique()
        .collect()
}

/// Deduplicate `codes` in order and drop every occurrence of `own`.
pub(crate) fn chain_without_self<'a, I>(own: &LocaleCode, codes: I) -> Vec<LocaleCode>
where
    I: IntoIterator<Item = &'a LocaleCode>,
{
    codes
        .into_iter()
        .filter(|code| *code != own)
        .unique()
        .cloned()
        .collect()
}
