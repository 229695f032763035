//! Error formatting helpers for stable, deterministic test assertions.

use std::error::Error;

/// Join an error and its sources (outermost to root cause) for stable
/// assertions.
///
/// Works with any error implementing [`std::error::Error`].
#[must_use]
pub fn display_error_chain(e: &(dyn Error + 'static)) -> String {
    let mut current: Option<&(dyn Error + 'static)> = Some(e);
    std::iter::from_fn(|| {
        let err = current?;
        current = err.source();
        Some(err.to_string())
    })
    .collect::<Vec<_>>()
    .join(": ")
}
