//! Test utilities shared by the `locale-init` integration tests.
//!
//! [`Project`] builds a scratch application root holding settings files and
//! translation resources; [`run_locale_init_in`] drives the built binary.

pub mod cli;
pub mod error;
pub mod project;

pub use cli::{LocaleInitRun, run_locale_init_in};
pub use error::display_error_chain;
pub use project::Project;

use locale_init::LocaleCode;

/// Build a [`LocaleCode`] from a literal, panicking on blank input.
///
/// # Panics
///
/// Panics when `raw` is blank.
#[must_use]
pub fn code(raw: &str) -> LocaleCode {
    LocaleCode::new(raw).unwrap_or_else(|| panic!("locale code {raw:?} must not be blank"))
}

/// Render codes as string slices for compact assertions.
#[must_use]
pub fn codes(list: &[LocaleCode]) -> Vec<&str> {
    list.iter().map(LocaleCode::as_str).collect()
}
