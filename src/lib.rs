//! Layered locale configuration for internationalization registries.
//!
//! The crate merges locale settings from bundled defaults, a YAML settings
//! file, the host framework and an in-process configuration block. From
//! those sources it derives the available locales, the default and active
//! locales, per-locale fallback chains and the translation load path, and
//! publishes the result to a [`LocaleRegistry`].
//!
//! ```rust
//! use locale_init::{LocaleCode, LocaleInit, MemoryRegistry};
//!
//! let mut init = LocaleInit::new();
//! init.ignore_settings_file();
//! init.available_locale([("en", "English"), ("pl", "Polski"), ("de", "Deutsch")]);
//! init.fallback([(LocaleCode::new("pl").expect("code"), ["de"])]);
//!
//! let mut registry = MemoryRegistry::new();
//! init.load(&mut registry);
//! let chain: Vec<&str> = registry.fallbacks_for("pl").iter().map(|c| c.as_str()).collect();
//! assert_eq!(chain, ["de", "en"]);
//! assert_eq!(init.resolve_code("pl").as_deref(), Some("Polski"));
//! ```

pub mod cli;
pub mod code;
pub mod fallbacks;
pub mod framework;
pub mod info;
pub mod init;
pub mod install;
pub mod load_path;
pub mod locales;
pub mod registry;
pub mod resolver;
pub mod runner;
pub mod settings;

pub use code::LocaleCode;
pub use fallbacks::FallbackMap;
pub use framework::{FrameworkAdapter, FrameworkConfig, FrameworkFallbacks, StaticFramework};
pub use init::{LoadedState, LocaleInit, LocaleInitBuilder};
pub use install::InstallError;
pub use registry::{LocaleRegistry, MemoryRegistry};
pub use settings::SettingsError;
