//! Installing the bundled settings into a host project.
//!
//! The installed copy has the bundled marker removed, so the library treats
//! it as a user-owned settings file.

use crate::settings::{BUNDLED_MARKER_KEY, BUNDLED_SETTINGS, DEFAULT_CONFIG_FILE};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};

mod error {
    // FIXME(rust-lang/rust#130021): remove once upstream is fixed.
    #![allow(
        clippy::allow_attributes,
        clippy::allow_attributes_without_reason,
        unused_assignments
    )]

    use camino::Utf8PathBuf;
    use miette::Diagnostic;
    use thiserror::Error;

    /// Errors raised while installing the settings file.
    #[derive(Debug, Error, Diagnostic)]
    pub enum InstallError {
        /// The target file exists and overwriting was not requested.
        #[error("settings file {path} already exists")]
        #[diagnostic(
            code(locale_init::install::exists),
            help("Pass --force to overwrite the existing file.")
        )]
        AlreadyExists {
            /// Path of the existing file.
            path: Utf8PathBuf,
        },

        /// The target directory could not be created.
        #[error("failed to create directory {path}")]
        #[diagnostic(code(locale_init::install::create_dir))]
        CreateDir {
            /// Directory that was attempted.
            path: Utf8PathBuf,
            /// Underlying I/O failure.
            #[source]
            source: std::io::Error,
        },

        /// The settings file could not be written.
        #[error("failed to write settings file {path}")]
        #[diagnostic(code(locale_init::install::write))]
        Write {
            /// File that was attempted.
            path: Utf8PathBuf,
            /// Underlying I/O failure.
            #[source]
            source: std::io::Error,
        },
    }
}

pub use error::InstallError;

const MARKER_COMMENT: &str = "# Marker that tells the engine";

/// Remove the bundled marker key and its comment from `document`.
///
/// # Examples
///
/// ```rust
/// use locale_init::install::strip_bundled_marker;
///
/// let stripped = strip_bundled_marker("locale_init_bundled: true\ndefault: en\n");
/// assert_eq!(stripped, "default: en\n");
/// ```
#[must_use]
pub fn strip_bundled_marker(document: &str) -> String {
    document
        .split_inclusive('\n')
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.starts_with(MARKER_COMMENT)
                && trimmed
                    .strip_prefix(BUNDLED_MARKER_KEY)
                    .is_none_or(|rest| !rest.trim_start().starts_with(':'))
        })
        .collect()
}

/// Write the bundled settings to `<target_dir>/locale.yml`.
///
/// Missing directories are created. An existing file is only replaced when
/// `force` is set.
///
/// # Errors
///
/// Returns [`InstallError::AlreadyExists`] when the file exists and `force`
/// is unset, or an I/O variant when the directory or file cannot be written.
pub fn install_settings(target_dir: &Utf8Path, force: bool) -> Result<Utf8PathBuf, InstallError> {
    fs::create_dir_all(target_dir).map_err(|source| InstallError::CreateDir {
        path: target_dir.to_owned(),
        source,
    })?;
    let path = target_dir.join(DEFAULT_CONFIG_FILE);
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = match options.open(&path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Err(InstallError::AlreadyExists { path });
        }
        Err(source) => return Err(InstallError::Write { path, source }),
    };
    file.write_all(strip_bundled_marker(BUNDLED_SETTINGS).as_bytes())
        .map_err(|source| InstallError::Write {
            path: path.clone(),
            source,
        })?;
    tracing::debug!(%path, "installed settings file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SettingsDoc, parse_settings};
    use tempfile::tempdir;

    #[test]
    fn stripped_bundled_settings_are_user_owned() {
        let stripped = strip_bundled_marker(BUNDLED_SETTINGS);
        assert!(!stripped.contains(BUNDLED_MARKER_KEY));
        let map = parse_settings(&stripped, "installed").expect("yaml");
        let doc = SettingsDoc::from_map(map, "installed");
        assert!(!doc.is_bundled_copy());
        assert!(doc.names().contains_key("pl"));
    }

    #[test]
    fn install_refuses_to_overwrite_without_force() {
        let dir = tempdir().expect("temp dir");
        let target = Utf8Path::from_path(dir.path()).expect("utf8 temp dir").join("config");
        let path = install_settings(&target, false).expect("first install");
        assert!(path.ends_with(DEFAULT_CONFIG_FILE));

        fs::write(&path, "default: pl\n").expect("edit installed file");
        let err = install_settings(&target, false).expect_err("second install");
        assert!(matches!(err, InstallError::AlreadyExists { .. }));
        assert_eq!(fs::read_to_string(&path).expect("read"), "default: pl\n");

        install_settings(&target, true).expect("forced install");
        let contents = fs::read_to_string(&path).expect("read");
        assert!(contents.contains("default: en"));
    }
}
