//! Error types for settings loading.
//!
//! This submodule isolates derive-macro-affected code to scope lint
//! suppressions narrowly. The `unused_assignments` lint fires in some Rust
//! versions due to thiserror/miette derive macro expansion.

// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while reading a settings document.
///
/// [`crate::LocaleInit::load`] never surfaces these: a source that fails to
/// load contributes an empty mapping instead.
#[derive(Debug, Error, Diagnostic)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {path}")]
    #[diagnostic(code(locale_init::settings::read))]
    Read {
        /// Path that was attempted.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid YAML.
    #[error("failed to parse settings from {name}")]
    #[diagnostic(
        code(locale_init::settings::parse),
        help("Use spaces for indentation and quote values containing ':'.")
    )]
    Parse {
        /// Name of the document (usually its path).
        name: String,
        /// Underlying YAML error.
        #[source]
        source: serde_saphyr::Error,
    },

    /// The settings document root is a scalar or a sequence.
    #[error("settings in {name} must be a mapping at the top level")]
    #[diagnostic(code(locale_init::settings::not_a_mapping))]
    NotAMapping {
        /// Name of the document (usually its path).
        name: String,
    },
}
