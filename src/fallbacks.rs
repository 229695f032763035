//! Fallback chain construction.
//!
//! Fallback mappings come from three sources. They are merged framework
//! first, then the settings file, then the configuration block, each later
//! source replacing the whole chain of any locale it mentions. Every
//! available locale then receives its final chain: the explicit entries,
//! followed (when [`FallbackBlock::uses_default`] is on) by the default
//! fallback locales and the default locale. Chains never contain their own
//! locale and never repeat a code.

use crate::code::{LocaleCode, chain_without_self, normalize_codes};
use crate::framework::FrameworkConfig;
use crate::settings::SettingsDoc;
use indexmap::IndexMap;
use itertools::Itertools;

/// Ordered fallback chains keyed by locale.
pub type FallbackMap = IndexMap<LocaleCode, Vec<LocaleCode>>;

/// Fallback settings made through the configuration API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackBlock {
    chains: FallbackMap,
    default_fallbacks: Option<Vec<LocaleCode>>,
    use_default: bool,
}

impl Default for FallbackBlock {
    fn default() -> Self {
        Self {
            chains: FallbackMap::new(),
            default_fallbacks: None,
            use_default: true,
        }
    }
}

impl FallbackBlock {
    /// Merge `chains` into the block, replacing existing chains per locale.
    ///
    /// Each chain is deduplicated; blank codes are dropped.
    pub fn merge<I, C, S>(&mut self, chains: I)
    where
        I: IntoIterator<Item = (LocaleCode, C)>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (code, chain) in chains {
            self.chains.insert(code, normalize_codes(chain));
        }
    }

    /// Chains set through the block.
    #[must_use]
    pub const fn chains(&self) -> &FallbackMap {
        &self.chains
    }

    /// Explicitly configured default fallback locales.
    #[must_use]
    pub fn default_fallbacks(&self) -> Option<&[LocaleCode]> {
        self.default_fallbacks.as_deref()
    }

    /// Set the default fallback locales.
    pub fn set_default_fallbacks<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let normalized = normalize_codes(codes);
        self.default_fallbacks = (!normalized.is_empty()).then_some(normalized);
    }

    /// Whether default fallbacks are appended to every chain.
    #[must_use]
    pub const fn uses_default(&self) -> bool {
        self.use_default
    }

    /// Toggle appending default fallbacks to every chain.
    pub const fn set_use_default(&mut self, enabled: bool) {
        self.use_default = enabled;
    }
}

/// Merge fallback chains: framework, then file, then block.
#[must_use]
pub fn merge_fallbacks(
    block: &FallbackBlock,
    file: &SettingsDoc,
    framework: &FrameworkConfig,
) -> FallbackMap {
    let mut merged = FallbackMap::new();
    let sources = [
        ("framework settings", framework.fallbacks.chains()),
        ("configuration file", Some(file.fallbacks())),
        ("configuration block", Some(block.chains())),
    ];
    for (title, source) in sources {
        let Some(chains) = source else { continue };
        tracing::debug!(source = title, entries = chains.len(), "merging fallbacks");
        for (code, chain) in chains {
            merged.insert(code.clone(), chain.clone());
        }
    }
    merged
}

/// Derive the default fallback locales.
///
/// Precedence is the explicit block value, the file's `default_fallbacks`,
/// the framework's defaults, and finally the default locale itself.
#[must_use]
pub fn derive_default_fallbacks(
    block: &FallbackBlock,
    file: &SettingsDoc,
    framework: &FrameworkConfig,
    default_locale: Option<&LocaleCode>,
) -> Vec<LocaleCode> {
    let candidates: [(&str, &[LocaleCode]); 3] = [
        ("configuration block", block.default_fallbacks().unwrap_or_default()),
        ("settings file", file.default_fallbacks()),
        ("framework settings", framework.fallbacks.defaults()),
    ];
    for (title, codes) in candidates {
        if !codes.is_empty() {
            tracing::debug!(source = title, ?codes, "default fallback locales derived");
            return codes.to_vec();
        }
    }
    default_locale.map_or_else(
        || {
            tracing::debug!("cannot determine default fallback locale");
            Vec::new()
        },
        |code| vec![code.clone()],
    )
}

/// Inputs to [`build_chains`].
#[derive(Debug, Clone, Copy)]
pub struct ChainInputs<'a> {
    /// Locales that receive a chain, in output order.
    pub available: &'a [LocaleCode],
    /// Merged explicit chains.
    pub explicit: &'a FallbackMap,
    /// Derived default fallback locales.
    pub default_fallbacks: &'a [LocaleCode],
    /// Derived default locale.
    pub default_locale: &'a LocaleCode,
    /// Whether defaults are appended.
    pub use_default: bool,
    /// Whether fallbacks are switched off entirely.
    pub disabled: bool,
}

/// Build the final chain for every available locale.
///
/// # Examples
///
/// ```rust
/// use locale_init::LocaleCode;
/// use locale_init::fallbacks::{ChainInputs, FallbackMap, build_chains};
///
/// let code = |raw: &str| LocaleCode::new(raw).expect("code");
/// let available = [code("en"), code("pl"), code("de")];
/// let mut explicit = FallbackMap::new();
/// explicit.insert(code("pl"), vec![code("fr")]);
/// let chains = build_chains(ChainInputs {
///     available: &available,
///     explicit: &explicit,
///     default_fallbacks: &[code("en")],
///     default_locale: &code("en"),
///     use_default: true,
///     disabled: false,
/// });
/// assert_eq!(chains.get("pl"), Some(&vec![code("fr"), code("en")]));
/// assert_eq!(chains.get("de"), Some(&vec![code("en")]));
/// assert_eq!(chains.get("en"), Some(&vec![]));
/// ```
#[must_use]
pub fn build_chains(inputs: ChainInputs<'_>) -> FallbackMap {
    inputs
        .available
        .iter()
        .map(|code| {
            if inputs.disabled {
                return (code.clone(), Vec::new());
            }
            let explicit = inputs.explicit.get(code).map_or(&[][..], Vec::as_slice);
            let defaults: &[LocaleCode] = if inputs.use_default {
                inputs.default_fallbacks
            } else {
                &[]
            };
            let tail = inputs
                .use_default
                .then_some(inputs.default_locale)
                .into_iter();
            let chain =
                chain_without_self(code, explicit.iter().chain(defaults.iter()).chain(tail));
            if !chain.is_empty() {
                let rendered = chain.iter().map(LocaleCode::as_str).join(" -> ");
                tracing::debug!(locale = %code, chain = %rendered, "fallback chain");
            }
            (code.clone(), chain)
        })
        .collect()
}
