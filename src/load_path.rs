//! Translation resource discovery.
//!
//! Load path entries are glob patterns. Relative patterns are anchored at
//! the root path when one is known. Matches are filtered to UTF-8 file
//! paths; invalid patterns and unreadable entries are logged and skipped.

use camino::{Utf8Path, Utf8PathBuf};
use glob::{MatchOptions, glob_with};
use itertools::Itertools;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Anchor `pattern` at `root` when it is relative.
#[must_use]
pub fn anchor_pattern(pattern: &str, root: Option<&Utf8Path>) -> String {
    match root {
        Some(base) if Utf8Path::new(pattern).is_relative() => base.join(pattern).into_string(),
        _ => pattern.to_owned(),
    }
}

/// Expand every pattern and collect matching files, in pattern order and
/// without duplicates.
#[must_use]
pub fn expand_load_path<'a, I>(patterns: I, root: Option<&Utf8Path>) -> Vec<Utf8PathBuf>
where
    I: IntoIterator<Item = &'a str>,
{
    patterns
        .into_iter()
        .flat_map(|pattern| expand_one(&anchor_pattern(pattern, root)))
        .unique()
        .collect()
}

fn expand_one(pattern: &str) -> Vec<Utf8PathBuf> {
    let entries = match glob_with(pattern, MATCH_OPTIONS) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(pattern, error = %err, "skipping invalid load path pattern");
            return Vec::new();
        }
    };
    let mut found = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(pattern, error = %err, "skipping unreadable load path entry");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        match Utf8PathBuf::from_path_buf(path) {
            Ok(utf8) => found.push(utf8),
            Err(raw) => {
                tracing::warn!(path = %raw.display(), "skipping non-UTF-8 load path entry");
            }
        }
    }
    tracing::debug!(pattern, matches = found.len(), "expanded load path");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn relative_patterns_are_anchored_at_root() {
        let root = Utf8Path::new("/srv/app");
        assert_eq!(
            anchor_pattern("locales/*.yml", Some(root)),
            "/srv/app/locales/*.yml"
        );
        assert_eq!(anchor_pattern("/etc/*.yml", Some(root)), "/etc/*.yml");
        assert_eq!(anchor_pattern("locales/*.yml", None), "locales/*.yml");
    }

    #[test]
    fn expansion_keeps_files_and_skips_invalid_patterns() {
        let dir = tempdir().expect("temp dir");
        let root = Utf8Path::from_path(dir.path()).expect("utf8 temp dir");
        fs::create_dir(root.join("locales")).expect("create locales");
        fs::create_dir(root.join("locales/nested.yml")).expect("create dir");
        fs::write(root.join("locales/en.yml"), "en: {}\n").expect("write en");
        fs::write(root.join("locales/pl.yml"), "pl: {}\n").expect("write pl");

        let found = expand_load_path(["locales/*.yml", "[", "locales/en.yml"], Some(root));
        let names: Vec<&str> = found.iter().filter_map(|path| path.file_name()).collect();
        assert_eq!(names, vec!["en.yml", "pl.yml"]);
    }
}
