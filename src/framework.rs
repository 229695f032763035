//! Host framework adapters.
//!
//! The host application describes its web framework through a
//! [`FrameworkAdapter`]. Adapters are checked once with
//! [`select_framework`]; the chosen adapter supplies the root path, the
//! active environment and the framework's own locale configuration.

use crate::code::LocaleCode;
use crate::fallbacks::FallbackMap;
use camino::Utf8PathBuf;
use std::fmt;

/// Fallback policy declared by the host framework.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FrameworkFallbacks {
    /// Fallbacks are on and the framework adds no rules of its own.
    #[default]
    Unset,
    /// Fallbacks are switched off; every chain ends up empty.
    Disabled,
    /// Fallbacks are on and these locales are the default fallbacks.
    Defaults(Vec<LocaleCode>),
    /// Fallbacks are on with explicit per-locale chains.
    Map(FallbackMap),
}

impl FrameworkFallbacks {
    /// Explicit per-locale chains declared by the framework.
    #[must_use]
    pub fn chains(&self) -> Option<&FallbackMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Default fallback locales declared by the framework.
    #[must_use]
    pub fn defaults(&self) -> &[LocaleCode] {
        match self {
            Self::Defaults(codes) => codes,
            _ => &[],
        }
    }

    /// Return `true` when the framework disabled fallbacks.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

/// Locale configuration read from the host framework.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkConfig {
    /// Default locale configured in the framework.
    pub default_locale: Option<LocaleCode>,
    /// Locales the framework declares as available.
    pub available_locales: Vec<LocaleCode>,
    /// Fallback policy.
    pub fallbacks: FrameworkFallbacks,
    /// Glob patterns for translation resources.
    pub load_path: Vec<String>,
}

impl FrameworkConfig {
    /// Return `true` when the framework contributes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Adapter between the host framework and the configuration engine.
pub trait FrameworkAdapter: fmt::Debug {
    /// Human-readable framework name used in reports.
    fn name(&self) -> &str;

    /// Return `true` when this framework is hosting the application.
    fn detect(&self) -> bool {
        true
    }

    /// Root directory of the host application, if known.
    fn root_path(&self) -> Option<Utf8PathBuf> {
        None
    }

    /// Active deployment environment (for example `production`).
    fn environment(&self) -> Option<String> {
        None
    }

    /// The framework's locale configuration.
    fn config(&self) -> FrameworkConfig;
}

/// Adapter used when no framework hosts the application.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFramework;

impl FrameworkAdapter for NoFramework {
    fn name(&self) -> &str {
        "none"
    }

    fn config(&self) -> FrameworkConfig {
        FrameworkConfig::default()
    }
}

/// Adapter holding values supplied up front by the host.
///
/// # Examples
///
/// ```rust
/// use locale_init::framework::{FrameworkAdapter, StaticFramework};
/// use locale_init::LocaleCode;
///
/// let framework = StaticFramework::new("static")
///     .with_default_locale(LocaleCode::new("de").expect("code"))
///     .with_environment("production");
/// assert_eq!(framework.environment().as_deref(), Some("production"));
/// assert_eq!(
///     framework.config().default_locale.map(|c| c.to_string()),
///     Some("de".to_owned())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticFramework {
    name: String,
    root_path: Option<Utf8PathBuf>,
    environment: Option<String>,
    config: FrameworkConfig,
}

impl StaticFramework {
    /// Create an adapter reporting `name` with an empty configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the root path reported by the adapter.
    #[must_use]
    pub fn with_root_path(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.root_path = Some(root.into());
        self
    }

    /// Set the environment reported by the adapter.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Set the framework's default locale.
    #[must_use]
    pub fn with_default_locale(mut self, code: LocaleCode) -> Self {
        self.config.default_locale = Some(code);
        self
    }

    /// Set the framework's available locales.
    #[must_use]
    pub fn with_available_locales(mut self, codes: impl IntoIterator<Item = LocaleCode>) -> Self {
        self.config.available_locales = codes.into_iter().collect();
        self
    }

    /// Set the framework's fallback policy.
    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: FrameworkFallbacks) -> Self {
        self.config.fallbacks = fallbacks;
        self
    }

    /// Add a translation load path glob.
    #[must_use]
    pub fn with_load_path(mut self, pattern: impl Into<String>) -> Self {
        self.config.load_path.push(pattern.into());
        self
    }
}

impl FrameworkAdapter for StaticFramework {
    fn name(&self) -> &str {
        &self.name
    }

    fn root_path(&self) -> Option<Utf8PathBuf> {
        self.root_path.clone()
    }

    fn environment(&self) -> Option<String> {
        self.environment.clone()
    }

    fn config(&self) -> FrameworkConfig {
        self.config.clone()
    }
}

/// Pick the first adapter that detects its framework, or [`NoFramework`].
#[must_use]
pub fn select_framework(candidates: Vec<Box<dyn FrameworkAdapter>>) -> Box<dyn FrameworkAdapter> {
    candidates
        .into_iter()
        .find(|adapter| adapter.detect())
        .map_or_else(
            || Box::new(NoFramework) as Box<dyn FrameworkAdapter>,
            |adapter| {
                tracing::debug!(framework = adapter.name(), "framework detected");
                adapter
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Absent;

    impl FrameworkAdapter for Absent {
        fn name(&self) -> &str {
            "absent"
        }

        fn detect(&self) -> bool {
            false
        }

        fn config(&self) -> FrameworkConfig {
            FrameworkConfig::default()
        }
    }

    #[test]
    fn unset_policy_adds_nothing() {
        let policy = FrameworkFallbacks::default();
        assert!(policy.chains().is_none());
        assert!(policy.defaults().is_empty());
        assert!(!policy.is_disabled());
    }

    #[test]
    fn select_framework_skips_undetected_adapters() {
        let chosen = select_framework(vec![
            Box::new(Absent),
            Box::new(StaticFramework::new("present")),
        ]);
        assert_eq!(chosen.name(), "present");
    }

    #[test]
    fn select_framework_defaults_to_none() {
        let chosen = select_framework(vec![Box::new(Absent)]);
        assert_eq!(chosen.name(), "none");
        assert!(chosen.config().is_empty());
    }
}
