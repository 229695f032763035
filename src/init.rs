//! The locale configuration context.
//!
//! [`LocaleInit`] owns every configuration source and the derived state. It
//! replaces a process-wide singleton: hosts build one context during
//! bootstrap, configure it, and call [`LocaleInit::load`] to publish the
//! result to a [`LocaleRegistry`].
//!
//! `load` runs a fixed sequence: settings sources are refreshed, the locale
//! set and default locale are derived (names are filled through the
//! resolver), fallback chains are built, load path patterns are expanded and
//! everything is published to the registry.

use crate::code::LocaleCode;
use crate::fallbacks::{
    ChainInputs, FallbackBlock, FallbackMap, build_chains, derive_default_fallbacks,
    merge_fallbacks,
};
use crate::framework::{FrameworkAdapter, FrameworkConfig, NoFramework};
use crate::load_path::expand_load_path;
use crate::locales::{DerivedLocales, LocaleBlock, LocaleEntries, LocaleSources, derive_locales};
use crate::registry::LocaleRegistry;
use crate::resolver::{Resolver, ResolverCache, resolve_code_in, resolve_name_in};
use crate::settings::{DEFAULT_CONFIG_FILE, FileOrigin, SettingsAggregator, SettingsDoc};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

/// Snapshot of the configuration published by the last [`LocaleInit::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedState {
    /// Available locales with their names.
    pub available: IndexMap<LocaleCode, String>,
    /// Default locale.
    pub default_locale: LocaleCode,
    /// Name of the default locale.
    pub default_name: String,
    /// Locale active after load.
    pub locale: LocaleCode,
    /// Right-to-left locales.
    pub rtl: Vec<LocaleCode>,
    /// Default fallback locales.
    pub default_fallbacks: Vec<LocaleCode>,
    /// Final fallback chain of every available locale.
    pub fallbacks: FallbackMap,
    /// Translation resources found on the load path.
    pub load_path: Vec<Utf8PathBuf>,
}

/// Locale configuration context.
///
/// # Examples
///
/// ```rust
/// use locale_init::{LocaleInit, MemoryRegistry};
///
/// let mut init = LocaleInit::new();
/// init.ignore_settings_file();
/// init.available_locale([("en", "English"), ("pl", "Polski")]);
/// let mut registry = MemoryRegistry::new();
/// let state = init.load(&mut registry);
/// assert_eq!(state.default_locale.as_str(), "en");
/// assert_eq!(registry.available_locales().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct LocaleInit {
    settings: SettingsAggregator,
    locales: LocaleBlock,
    fallbacks: FallbackBlock,
    load_path: Vec<String>,
    resolver: Resolver,
    block_used: bool,
    loaded: Option<LoadedState>,
}

/// Builder for [`LocaleInit`].
#[derive(Debug, Default)]
pub struct LocaleInitBuilder {
    framework: Option<Box<dyn FrameworkAdapter>>,
    config_file: Option<Utf8PathBuf>,
    bundled_settings_file: Option<Utf8PathBuf>,
    root_path: Option<Utf8PathBuf>,
    environment: Option<String>,
    load_path: Vec<String>,
}

impl LocaleInitBuilder {
    /// Use `adapter` as the host framework.
    #[must_use]
    pub fn framework(mut self, adapter: Box<dyn FrameworkAdapter>) -> Self {
        self.framework = Some(adapter);
        self
    }

    /// Read settings from `path`.
    #[must_use]
    pub fn config_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Read bundled defaults from `path` instead of the embedded copy.
    #[must_use]
    pub fn bundled_settings_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.bundled_settings_file = Some(path.into());
        self
    }

    /// Set the application root path.
    #[must_use]
    pub fn root_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.root_path = Some(path.into());
        self
    }

    /// Set the active environment.
    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Add a load path glob pattern.
    #[must_use]
    pub fn load_path(mut self, pattern: impl Into<String>) -> Self {
        self.load_path.push(pattern.into());
        self
    }

    /// Build the context.
    #[must_use]
    pub fn build(self) -> LocaleInit {
        let adapter = self
            .framework
            .unwrap_or_else(|| Box::new(NoFramework) as Box<dyn FrameworkAdapter>);
        let mut settings = SettingsAggregator::new(adapter);
        settings.set_config_file(self.config_file);
        settings.set_bundled_settings_file(self.bundled_settings_file);
        settings.set_root_path(self.root_path);
        settings.set_environment(self.environment);
        LocaleInit {
            settings,
            load_path: self.load_path,
            ..LocaleInit::default()
        }
    }
}

fn resolver_cache(settings: &SettingsAggregator, block: &LocaleBlock) -> ResolverCache {
    let file = settings.settings();
    let bundled: Vec<(&LocaleCode, &str)> = if file.is_bundled_copy() {
        Vec::new()
    } else {
        settings.settings_bundled().name_pairs().collect()
    };
    let from_file: Vec<(&LocaleCode, &str)> = file.name_pairs().collect();
    let from_block: Vec<(&LocaleCode, &str)> = block
        .available()
        .iter()
        .filter_map(|(code, name)| name.as_deref().map(|value| (code, value)))
        .collect();
    ResolverCache::build([bundled, from_file, from_block])
}

impl LocaleInit {
    /// Create a context with no framework and default paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a context.
    #[must_use]
    pub fn builder() -> LocaleInitBuilder {
        LocaleInitBuilder::default()
    }

    /// Run `block` against the context and record that the configuration
    /// block was used.
    pub fn configure(&mut self, block: impl FnOnce(&mut Self)) -> &mut Self {
        self.block_used = true;
        block(self);
        self
    }

    /// Return `true` once [`LocaleInit::configure`] has been called.
    #[must_use]
    pub const fn is_block_used(&self) -> bool {
        self.block_used
    }

    // Sources and paths

    /// The settings aggregator.
    #[must_use]
    pub const fn sources(&self) -> &SettingsAggregator {
        &self.settings
    }

    /// File-sourced settings for the active environment.
    #[must_use]
    pub fn settings(&self) -> &SettingsDoc {
        self.settings.settings()
    }

    /// Bundled default settings.
    #[must_use]
    pub fn settings_bundled(&self) -> &SettingsDoc {
        self.settings.settings_bundled()
    }

    /// Framework configuration.
    #[must_use]
    pub fn settings_framework(&self) -> &FrameworkConfig {
        self.settings.settings_framework()
    }

    /// Replace the host framework adapter.
    pub fn set_framework(&mut self, adapter: Box<dyn FrameworkAdapter>) {
        self.settings.set_adapter(adapter);
        self.resolver.invalidate();
    }

    /// Name of the host framework.
    #[must_use]
    pub fn framework_name(&self) -> &str {
        self.settings.adapter().name()
    }

    /// Settings file path in effect.
    #[must_use]
    pub fn config_file(&self) -> Option<Utf8PathBuf> {
        self.settings.config_file()
    }

    /// Set the settings file path.
    pub fn set_config_file(&mut self, path: impl Into<Utf8PathBuf>) {
        let path = path.into();
        tracing::debug!(%path, "setting config file");
        self.settings.set_config_file(Some(path));
        self.resolver.invalidate();
    }

    /// Set the bundled settings file path.
    pub fn set_bundled_settings_file(&mut self, path: impl Into<Utf8PathBuf>) {
        self.settings.set_bundled_settings_file(Some(path.into()));
        self.resolver.invalidate();
    }

    /// Root path in effect.
    #[must_use]
    pub fn root_path(&self) -> Option<Utf8PathBuf> {
        self.settings.root_path()
    }

    /// Set the root path.
    pub fn set_root_path(&mut self, path: impl Into<Utf8PathBuf>) {
        self.settings.set_root_path(Some(path.into()));
        self.resolver.invalidate();
    }

    /// Environment in effect.
    #[must_use]
    pub fn environment(&self) -> Option<String> {
        self.settings.environment()
    }

    /// Set the active environment.
    pub fn set_environment(&mut self, environment: impl Into<String>) {
        self.settings.set_environment(Some(environment.into()));
        self.resolver.invalidate();
    }

    /// Explicit load path patterns.
    #[must_use]
    pub fn load_path(&self) -> &[String] {
        &self.load_path
    }

    /// Add a load path glob pattern.
    pub fn add_load_path(&mut self, pattern: impl Into<String>) {
        self.load_path.push(pattern.into());
    }

    // Ignore flags

    /// Whether the settings file is ignored.
    #[must_use]
    pub const fn ignores_settings_file(&self) -> bool {
        self.settings.ignores_settings_file()
    }

    /// Set whether the settings file is ignored.
    pub fn set_ignore_settings_file(&mut self, ignore: bool) {
        self.settings.set_ignore_settings_file(ignore);
        self.resolver.invalidate();
    }

    /// Ignore the settings file.
    pub fn ignore_settings_file(&mut self) {
        self.set_ignore_settings_file(true);
    }

    /// Whether the bundled settings are ignored.
    #[must_use]
    pub const fn ignores_bundled_settings(&self) -> bool {
        self.settings.ignores_bundled_settings()
    }

    /// Set whether the bundled settings are ignored.
    pub fn set_ignore_bundled_settings(&mut self, ignore: bool) {
        self.settings.set_ignore_bundled_settings(ignore);
        self.resolver.invalidate();
    }

    /// Ignore the bundled settings.
    pub fn ignore_bundled_settings(&mut self) {
        self.set_ignore_bundled_settings(true);
    }

    /// Whether the framework settings are ignored.
    #[must_use]
    pub const fn ignores_framework_settings(&self) -> bool {
        self.settings.ignores_framework_settings()
    }

    /// Set whether the framework settings are ignored.
    pub fn set_ignore_framework_settings(&mut self, ignore: bool) {
        self.settings.set_ignore_framework_settings(ignore);
        self.resolver.invalidate();
    }

    /// Ignore the framework settings.
    pub fn ignore_framework_settings(&mut self) {
        self.set_ignore_framework_settings(true);
    }

    // Locales

    /// Add available locales; see [`LocaleBlock::available_locale`].
    pub fn available_locale(&mut self, entries: impl Into<LocaleEntries>) {
        self.locales.available_locale(entries);
        self.resolver.invalidate();
    }

    /// Remove an available locale and return its name.
    pub fn delete_locale(&mut self, code: &LocaleCode) -> Option<String> {
        self.resolver.invalidate();
        self.locales.delete_locale(code)
    }

    /// Locales added through the configuration API.
    #[must_use]
    pub const fn configured_locales(&self) -> &IndexMap<LocaleCode, Option<String>> {
        self.locales.available()
    }

    /// Set the default locale, looking the name up in the configured
    /// locales when `name` is absent.
    pub fn set_default_locale(&mut self, code: LocaleCode, name: Option<&str>) {
        self.locales.set_default_locale(code, name);
    }

    /// Default locale derived from the current sources.
    #[must_use]
    pub fn default_locale(&self) -> LocaleCode {
        self.derive_current().default_locale
    }

    /// Set the locale that becomes active on load.
    pub fn set_locale(&mut self, code: LocaleCode) {
        self.locales.set_locale(code);
    }

    /// Add right-to-left locales.
    pub fn add_rtl_locales<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales.add_rtl_locales(codes);
    }

    // Fallbacks

    /// Merge fallback chains, replacing the chain of every listed locale.
    pub fn fallback<I, C, S>(&mut self, chains: I)
    where
        I: IntoIterator<Item = (LocaleCode, C)>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks.merge(chains);
    }

    /// Fallback chains set through the configuration API.
    #[must_use]
    pub const fn configured_fallbacks(&self) -> &FallbackMap {
        self.fallbacks.chains()
    }

    /// Set the default fallback locales.
    pub fn set_default_fallback_locale<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks.set_default_fallbacks(codes);
    }

    /// Default fallback locales derived from the current sources.
    #[must_use]
    pub fn default_fallback_locale(&self) -> Vec<LocaleCode> {
        let default_locale = self.default_locale();
        derive_default_fallbacks(
            &self.fallbacks,
            self.settings.settings(),
            self.settings.settings_framework(),
            Some(&default_locale),
        )
    }

    /// Toggle appending the default fallbacks to every chain.
    pub const fn set_fallbacks_use_default(&mut self, enabled: bool) {
        self.fallbacks.set_use_default(enabled);
    }

    /// Whether the default fallbacks are appended to every chain.
    #[must_use]
    pub const fn fallbacks_use_default(&self) -> bool {
        self.fallbacks.uses_default()
    }

    // Resolver

    fn resolver_data(&self) -> &ResolverCache {
        let settings = &self.settings;
        let block = &self.locales;
        self.resolver
            .cache_or_build(|| resolver_cache(settings, block))
    }

    /// Best-known name for `code`; the code itself when unknown.
    #[must_use]
    pub fn resolve_code(&self, code: &str) -> Option<String> {
        resolve_code_in(self.resolver_data(), code)
    }

    /// Code for the language `name`; the name itself when unknown.
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> Option<LocaleCode> {
        resolve_name_in(self.resolver_data(), name)
    }

    // Lifecycle

    /// Drop cached settings and resolver data.
    pub fn invalidate_caches(&mut self) {
        self.settings.invalidate();
        self.resolver.invalidate();
    }

    /// Revert to the state of a freshly built context, keeping the framework
    /// adapter.
    pub fn reset(&mut self) {
        tracing::debug!("resetting locale configuration");
        self.settings.reset();
        self.locales = LocaleBlock::default();
        self.fallbacks = FallbackBlock::default();
        self.load_path.clear();
        self.resolver.invalidate();
        self.block_used = false;
        self.loaded = None;
    }

    /// Return `true` after a successful [`LocaleInit::load`] and before the
    /// next [`LocaleInit::reset`].
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.loaded.is_some()
    }

    /// State published by the last load.
    #[must_use]
    pub const fn loaded(&self) -> Option<&LoadedState> {
        self.loaded.as_ref()
    }

    fn derive_current(&self) -> DerivedLocales {
        let sources = LocaleSources {
            block: &self.locales,
            file: self.settings.settings(),
            framework: self.settings.settings_framework(),
        };
        let cache = self.resolver_data();
        derive_locales(sources, |code| {
            resolve_code_in(cache, code.as_str()).unwrap_or_else(|| code.to_string())
        })
    }

    /// Derive the configuration and publish it to `registry`.
    pub fn load(&mut self, registry: &mut impl LocaleRegistry) -> &LoadedState {
        tracing::debug!("loading locale configuration");
        self.invalidate_caches();

        let locales = self.derive_current();
        let file = self.settings.settings();
        let framework = self.settings.settings_framework();

        let default_fallbacks = derive_default_fallbacks(
            &self.fallbacks,
            file,
            framework,
            Some(&locales.default_locale),
        );
        let explicit = merge_fallbacks(&self.fallbacks, file, framework);
        let codes: Vec<LocaleCode> = locales.available.keys().cloned().collect();
        let chains = build_chains(ChainInputs {
            available: &codes,
            explicit: &explicit,
            default_fallbacks: &default_fallbacks,
            default_locale: &locales.default_locale,
            use_default: self.fallbacks.uses_default(),
            disabled: framework.fallbacks.is_disabled(),
        });

        let root = self.settings.root_path();
        let patterns = self
            .load_path
            .iter()
            .chain(&framework.load_path)
            .map(String::as_str)
            .unique();
        let load_path = expand_load_path(patterns, root.as_deref());

        registry.set_available_locales(&codes);
        registry.set_default_locale(&locales.default_locale);
        registry.set_locale(&locales.locale);
        registry.set_fallbacks(&chains);
        for path in &load_path {
            registry.append_load_path(path);
        }
        tracing::debug!(
            default = %locales.default_locale,
            locale = %locales.locale,
            available = codes.len(),
            "locale configuration loaded"
        );

        let DerivedLocales {
            available,
            default_locale,
            default_name,
            locale,
            rtl,
        } = locales;
        self.loaded.insert(LoadedState {
            available,
            default_locale,
            default_name,
            locale,
            rtl,
            default_fallbacks,
            fallbacks: chains,
            load_path,
        })
    }

    /// Human-readable summary of the sources that contributed settings.
    ///
    /// Returns `defaults` when nothing contributed.
    #[must_use]
    pub fn settings_info(&self) -> String {
        let mut parts = Vec::new();
        if !self.ignores_framework_settings() && self.framework_name() != "none" {
            let empty = if self.settings_framework().is_empty() {
                " (empty)"
            } else {
                ""
            };
            parts.push(format!("{} configuration{empty}", self.framework_name()));
        }
        if let Some(entry) = self.file_summary() {
            parts.push(entry);
        }
        if self.block_used {
            parts.push("configuration block".to_owned());
        }
        if parts.is_empty() {
            return "defaults".to_owned();
        }
        parts.join(", ")
    }

    fn file_summary(&self) -> Option<String> {
        let origin = self.settings.settings_origin();
        let name = match origin {
            FileOrigin::Empty => return None,
            FileOrigin::File => self.config_file(),
            FileOrigin::Bundled => self
                .settings
                .bundled_settings_file()
                .map(Utf8Path::to_path_buf),
        };
        let base = name
            .as_deref()
            .and_then(Utf8Path::file_name)
            .unwrap_or(DEFAULT_CONFIG_FILE);
        let doc = self.settings();
        let suffix = if doc.is_empty() {
            " (empty)"
        } else if doc.is_bundled_copy() {
            " (bundled)"
        } else {
            ""
        };
        Some(format!("{base}{suffix}"))
    }
}
