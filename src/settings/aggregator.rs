//! Lazily cached settings sources with per-source suppression.

use super::{
    BUNDLED_SETTINGS, DEFAULT_CONFIG_FILE, EMPTY_SETTINGS, SettingsDoc, SettingsMap,
    parse_settings, read_settings, select_environment,
};
use crate::framework::{FrameworkAdapter, FrameworkConfig, NoFramework};
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::OnceCell;
use std::sync::LazyLock;

static EMPTY_FRAMEWORK: LazyLock<FrameworkConfig> = LazyLock::new(FrameworkConfig::default);

/// Where the file-sourced settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrigin {
    /// The configured settings file.
    File,
    /// The bundled defaults, used because no settings file was found.
    Bundled,
    /// Nothing: the source is ignored or no file exists.
    Empty,
}

/// Serves the bundled, file and framework settings sources.
///
/// File and bundled documents are read on first access and kept until
/// [`SettingsAggregator::invalidate`] is called. The framework configuration
/// is queried once per adapter.
#[derive(Debug)]
pub struct SettingsAggregator {
    adapter: Box<dyn FrameworkAdapter>,
    config_file: Option<Utf8PathBuf>,
    bundled_file: Option<Utf8PathBuf>,
    root_path: Option<Utf8PathBuf>,
    environment: Option<String>,
    ignore_settings_file: bool,
    ignore_bundled_settings: bool,
    ignore_framework_settings: bool,
    file: OnceCell<(SettingsDoc, FileOrigin)>,
    bundled: OnceCell<SettingsDoc>,
    framework: OnceCell<FrameworkConfig>,
}

impl Default for SettingsAggregator {
    fn default() -> Self {
        Self::new(Box::new(NoFramework))
    }
}

impl SettingsAggregator {
    /// Create an aggregator reading framework values from `adapter`.
    #[must_use]
    pub fn new(adapter: Box<dyn FrameworkAdapter>) -> Self {
        Self {
            adapter,
            config_file: None,
            bundled_file: None,
            root_path: None,
            environment: None,
            ignore_settings_file: false,
            ignore_bundled_settings: false,
            ignore_framework_settings: false,
            file: OnceCell::new(),
            bundled: OnceCell::new(),
            framework: OnceCell::new(),
        }
    }

    /// Clear cached file and bundled documents.
    pub fn invalidate(&mut self) {
        self.file.take();
        self.bundled.take();
    }

    /// Restore every path and flag to its initial state and drop all caches,
    /// including the framework configuration.
    pub fn reset(&mut self) {
        self.config_file = None;
        self.bundled_file = None;
        self.root_path = None;
        self.environment = None;
        self.ignore_settings_file = false;
        self.ignore_bundled_settings = false;
        self.ignore_framework_settings = false;
        self.framework.take();
        self.invalidate();
    }

    /// The framework adapter in use.
    #[must_use]
    pub fn adapter(&self) -> &dyn FrameworkAdapter {
        self.adapter.as_ref()
    }

    /// Replace the framework adapter.
    pub fn set_adapter(&mut self, adapter: Box<dyn FrameworkAdapter>) {
        self.adapter = adapter;
        self.framework.take();
        self.invalidate();
    }

    /// Root path: explicit, else reported by the framework.
    #[must_use]
    pub fn root_path(&self) -> Option<Utf8PathBuf> {
        self.root_path
            .clone()
            .or_else(|| self.adapter.root_path())
    }

    /// Set the root path.
    pub fn set_root_path(&mut self, root: Option<Utf8PathBuf>) {
        self.root_path = root;
        self.invalidate();
    }

    /// Settings file path: explicit, else `locale.yml` under the root path.
    #[must_use]
    pub fn config_file(&self) -> Option<Utf8PathBuf> {
        self.config_file
            .clone()
            .or_else(|| self.root_path().map(|root| root.join(DEFAULT_CONFIG_FILE)))
    }

    /// Set the settings file path.
    pub fn set_config_file(&mut self, path: Option<Utf8PathBuf>) {
        self.config_file = path;
        self.invalidate();
    }

    /// Explicit bundled settings file, if any.
    #[must_use]
    pub fn bundled_settings_file(&self) -> Option<&Utf8Path> {
        self.bundled_file.as_deref()
    }

    /// Use `path` instead of the embedded bundled defaults.
    pub fn set_bundled_settings_file(&mut self, path: Option<Utf8PathBuf>) {
        self.bundled_file = path;
        self.invalidate();
    }

    /// Active environment: explicit, else reported by the framework.
    #[must_use]
    pub fn environment(&self) -> Option<String> {
        self.environment
            .clone()
            .or_else(|| self.adapter.environment())
    }

    /// Set the active environment.
    pub fn set_environment(&mut self, environment: Option<String>) {
        self.environment = environment;
        self.invalidate();
    }

    /// Whether the settings file is ignored.
    #[must_use]
    pub const fn ignores_settings_file(&self) -> bool {
        self.ignore_settings_file
    }

    /// Set whether the settings file is ignored.
    pub fn set_ignore_settings_file(&mut self, ignore: bool) {
        if ignore {
            tracing::debug!("ignoring settings file");
        }
        self.ignore_settings_file = ignore;
        self.invalidate();
    }

    /// Whether the bundled settings are ignored.
    #[must_use]
    pub const fn ignores_bundled_settings(&self) -> bool {
        self.ignore_bundled_settings
    }

    /// Set whether the bundled settings are ignored.
    pub fn set_ignore_bundled_settings(&mut self, ignore: bool) {
        if ignore {
            tracing::debug!("ignoring bundled settings");
        }
        self.ignore_bundled_settings = ignore;
        self.invalidate();
    }

    /// Whether the framework settings are ignored.
    #[must_use]
    pub const fn ignores_framework_settings(&self) -> bool {
        self.ignore_framework_settings
    }

    /// Set whether the framework settings are ignored.
    pub fn set_ignore_framework_settings(&mut self, ignore: bool) {
        if ignore {
            tracing::debug!("ignoring framework settings");
        }
        self.ignore_framework_settings = ignore;
        self.invalidate();
    }

    /// File-sourced settings, narrowed to the active environment.
    ///
    /// When no settings file exists the bundled defaults stand in, unless
    /// they are ignored too.
    #[must_use]
    pub fn settings(&self) -> &SettingsDoc {
        &self.file_entry().0
    }

    /// Origin of [`SettingsAggregator::settings`].
    #[must_use]
    pub fn settings_origin(&self) -> FileOrigin {
        self.file_entry().1
    }

    fn file_entry(&self) -> &(SettingsDoc, FileOrigin) {
        self.file.get_or_init(|| {
            if self.ignore_settings_file {
                return (SettingsDoc::default(), FileOrigin::Empty);
            }
            let environment = self.environment();
            if let Some(path) = self.config_file()
                && let Some(map) = load_or_warn(&path)
            {
                let scoped = select_environment(map, environment.as_deref());
                return (SettingsDoc::from_map(scoped, path.as_str()), FileOrigin::File);
            }
            if self.ignore_bundled_settings {
                return (SettingsDoc::default(), FileOrigin::Empty);
            }
            tracing::debug!("no settings file found, using bundled settings");
            let scoped = select_environment(self.bundled_map(), environment.as_deref());
            (SettingsDoc::from_map(scoped, "bundled settings"), FileOrigin::Bundled)
        })
    }

    /// Bundled default settings.
    #[must_use]
    pub fn settings_bundled(&self) -> &SettingsDoc {
        if self.ignore_bundled_settings {
            return &EMPTY_SETTINGS;
        }
        self.bundled
            .get_or_init(|| SettingsDoc::from_map(self.bundled_map(), "bundled settings"))
    }

    /// Framework configuration, queried once from the adapter.
    #[must_use]
    pub fn settings_framework(&self) -> &FrameworkConfig {
        if self.ignore_framework_settings {
            return &EMPTY_FRAMEWORK;
        }
        self.framework.get_or_init(|| {
            tracing::debug!(framework = self.adapter.name(), "gathering framework info");
            self.adapter.config()
        })
    }

    fn bundled_map(&self) -> SettingsMap {
        match self.bundled_file.as_deref() {
            Some(path) => load_or_warn(path).unwrap_or_default(),
            None => parse_settings(BUNDLED_SETTINGS, "bundled settings").unwrap_or_else(|err| {
                tracing::warn!(error = %err, "embedded bundled settings are invalid");
                SettingsMap::new()
            }),
        }
    }
}

fn load_or_warn(path: &Utf8Path) -> Option<SettingsMap> {
    match read_settings(path) {
        Ok(map) => map,
        Err(err) => {
            tracing::warn!(%path, error = %err, "ignoring unreadable settings file");
            Some(SettingsMap::new())
        }
    }
}
