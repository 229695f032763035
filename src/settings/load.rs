//! Reading settings documents from disk.

use super::{SettingsError, SettingsMap, SettingsValue};
use camino::Utf8Path;
use std::{fs, io};

/// File name looked up under the host root path when no settings file is set.
pub const DEFAULT_CONFIG_FILE: &str = "locale.yml";

/// Only `true` and `false` are booleans: `no`, `on` and friends are locale
/// codes, not YAML 1.1 booleans.
fn yaml_options() -> serde_saphyr::Options {
    serde_saphyr::Options {
        strict_booleans: true,
        ..serde_saphyr::Options::default()
    }
}

/// Parse a YAML settings document into a top-level mapping.
///
/// Blank documents and documents holding only `null` parse to an empty
/// mapping. Plain scalars such as `no` or `on` stay strings.
///
/// # Errors
///
/// Returns [`SettingsError::Parse`] when the YAML is invalid and
/// [`SettingsError::NotAMapping`] when the document root is not a mapping.
pub fn parse_settings(yaml: &str, name: &str) -> Result<SettingsMap, SettingsError> {
    if yaml.trim().is_empty() {
        return Ok(SettingsMap::new());
    }
    let doc: SettingsValue =
        serde_saphyr::from_str_with_options(yaml, yaml_options()).map_err(|source| {
            SettingsError::Parse {
                name: name.to_owned(),
                source,
            }
        })?;
    match doc {
        SettingsValue::Object(map) => Ok(map),
        SettingsValue::Null => Ok(SettingsMap::new()),
        _ => Err(SettingsError::NotAMapping {
            name: name.to_owned(),
        }),
    }
}

/// Read and parse the settings file at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Read`] when the file exists but cannot be read,
/// or any error produced by [`parse_settings`].
pub fn read_settings(path: &Utf8Path) -> Result<Option<SettingsMap>, SettingsError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_owned(),
                source,
            });
        }
    };
    tracing::debug!(%path, "reading settings from file");
    parse_settings(&data, path.as_str()).map(Some)
}

/// Narrow `map` to the section named by `environment` when that section
/// exists and is a mapping.
///
/// # Examples
///
/// ```rust
/// use locale_init::settings::{parse_settings, select_environment};
///
/// let map = parse_settings("default: en\nproduction:\n  default: pl\n", "inline")
///     .expect("valid YAML");
/// let scoped = select_environment(map, Some("production"));
/// assert_eq!(scoped.get("default").and_then(|v| v.as_str()), Some("pl"));
/// ```
#[must_use]
pub fn select_environment(map: SettingsMap, environment: Option<&str>) -> SettingsMap {
    let Some(env_name) = environment.filter(|value| !value.is_empty()) else {
        return map;
    };
    match map.get(env_name) {
        Some(SettingsValue::Object(section)) => {
            tracing::debug!(environment = env_name, "switching to environment section");
            section.clone()
        }
        Some(_) => {
            tracing::warn!(
                environment = env_name,
                "environment section is not a mapping; using the whole document"
            );
            map
        }
        None => map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    #[case("")]
    #[case("   \n")]
    #[case("~\n")]
    fn blank_documents_parse_empty(#[case] yaml: &str) {
        let map = parse_settings(yaml, "blank").expect("blank document");
        assert!(map.is_empty());
    }

    #[test]
    fn scalar_root_is_rejected() {
        let err = parse_settings("just a string\n", "scalar").expect_err("scalar root");
        assert!(matches!(err, SettingsError::NotAMapping { .. }), "{err}");
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let err = parse_settings("available: [en, pl\n", "broken").expect_err("broken YAML");
        assert!(matches!(err, SettingsError::Parse { .. }), "{err}");
    }

    #[test]
    fn yaml_one_one_booleans_stay_strings() {
        let map = parse_settings("available: [en, no]\ndefault: no\nmarker: true\n", "codes")
            .expect("valid YAML");
        assert_eq!(map.get("default"), Some(&SettingsValue::from("no")));
        assert_eq!(
            map.get("available"),
            Some(&serde_json::json!(["en", "no"]))
        );
        assert_eq!(map.get("marker"), Some(&SettingsValue::Bool(true)));
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.yml")).expect("utf8 path");
        assert!(read_settings(&path).expect("missing file").is_none());
    }

    #[test]
    fn environment_section_must_be_a_mapping() {
        let map = parse_settings("default: en\nproduction: yes please\n", "env")
            .expect("valid YAML");
        let scoped = select_environment(map.clone(), Some("production"));
        assert_eq!(scoped, map);
    }

    #[test]
    fn unknown_environment_keeps_document() {
        let map = parse_settings("default: en\n", "env").expect("valid YAML");
        let scoped = select_environment(map.clone(), Some("staging"));
        assert_eq!(scoped, map);
    }
}
