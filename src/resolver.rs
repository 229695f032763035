//! Bidirectional locale code and language name resolution.
//!
//! The [`Resolver`] lazily builds a [`ResolverCache`] from layered name
//! sources and keeps it until [`Resolver::invalidate`] is called. Later layers
//! overwrite earlier ones for the same code; the reverse map is the exact
//! inverse of the forward map, so when two codes share a name the code
//! inserted last wins.

use crate::code::LocaleCode;
use indexmap::IndexMap;
use std::cell::OnceCell;

/// Forward and reverse name lookup tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverCache {
    forward: IndexMap<LocaleCode, String>,
    reverse: IndexMap<String, LocaleCode>,
}

impl ResolverCache {
    /// Build the tables from `layers`, lowest precedence first.
    ///
    /// Blank names are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locale_init::LocaleCode;
    /// use locale_init::resolver::ResolverCache;
    ///
    /// let en = LocaleCode::new("en").expect("code");
    /// let gb = LocaleCode::new("en-GB").expect("code");
    /// let cache = ResolverCache::build([
    ///     vec![(&en, "English")],
    ///     vec![(&gb, "English")],
    /// ]);
    /// assert_eq!(cache.name_for("en"), Some("English"));
    /// assert_eq!(cache.code_for("English").map(|c| c.as_str()), Some("en-GB"));
    /// ```
    #[must_use]
    pub fn build<'a, L, P>(layers: L) -> Self
    where
        L: IntoIterator<Item = P>,
        P: IntoIterator<Item = (&'a LocaleCode, &'a str)>,
    {
        let mut forward = IndexMap::new();
        for layer in layers {
            for (code, name) in layer {
                if name.trim().is_empty() {
                    continue;
                }
                forward.insert(code.clone(), name.to_owned());
            }
        }
        let reverse = forward
            .iter()
            .map(|(code, name)| (name.clone(), code.clone()))
            .collect();
        Self { forward, reverse }
    }

    /// Name recorded for `code`.
    #[must_use]
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.forward.get(code).map(String::as_str)
    }

    /// Code recorded for `name`.
    #[must_use]
    pub fn code_for(&self, name: &str) -> Option<&LocaleCode> {
        self.reverse.get(name)
    }

    /// Number of known codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Return `true` when no names are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Lazily built, invalidatable name resolver.
#[derive(Debug, Default)]
pub struct Resolver {
    cache: OnceCell<ResolverCache>,
}

impl Resolver {
    /// Create a resolver with an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cache: OnceCell::new(),
        }
    }

    /// Return the cache, building it with `build` on first use.
    pub fn cache_or_build(&self, build: impl FnOnce() -> ResolverCache) -> &ResolverCache {
        self.cache.get_or_init(|| {
            let cache = build();
            tracing::debug!(names = cache.len(), "loaded resolver data");
            cache
        })
    }

    /// Return `true` when the cache has been built.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Drop the cached tables so the next lookup rebuilds them.
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            tracing::debug!("invalidating resolver caches");
        }
    }
}

/// Resolve `code` to a name using `cache`.
///
/// Unknown codes resolve to themselves; blank input resolves to `None`.
#[must_use]
pub fn resolve_code_in(cache: &ResolverCache, code: &str) -> Option<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(cache.name_for(trimmed).unwrap_or(trimmed).to_owned())
}

/// Resolve `name` to a code using `cache`.
///
/// Unknown names are treated as codes; blank input resolves to `None`.
#[must_use]
pub fn resolve_name_in(cache: &ResolverCache, name: &str) -> Option<LocaleCode> {
    cache
        .code_for(name.trim())
        .cloned()
        .or_else(|| LocaleCode::new(name))
}
