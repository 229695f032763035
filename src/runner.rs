//! CLI execution and command dispatch logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! builds a [`LocaleInit`] from the parsed [`Cli`], loads it into an
//! in-memory registry and writes the requested report to standard output.

use crate::cli::{Cli, Commands, InfoArgs};
use crate::code::LocaleCode;
use crate::init::{LoadedState, LocaleInit};
use crate::install::install_settings;
use crate::registry::MemoryRegistry;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

#[derive(Debug, Serialize)]
struct InfoReport<'a> {
    framework: &'a str,
    sources: String,
    #[serde(flatten)]
    state: &'a LoadedState,
}

/// Execute the parsed [`Cli`] command, writing to standard output.
///
/// # Errors
///
/// Returns an error when installing fails, when a resolve argument is blank,
/// or when writing the report fails.
pub fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(cli, &mut out)
}

/// Execute the parsed [`Cli`] command, writing reports to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let command = cli
        .command
        .clone()
        .unwrap_or_else(|| Commands::Info(InfoArgs::default()));
    match command {
        Commands::Install { dir, force } => {
            let path = install_settings(&dir, force)
                .with_context(|| format!("failed to install settings into {dir}"))?;
            writeln!(out, "{path}")?;
        }
        Commands::ResolveCode { code } => {
            let init = build_context(cli);
            let Some(name) = init.resolve_code(&code) else {
                bail!("locale code must not be blank");
            };
            writeln!(out, "{name}")?;
        }
        Commands::ResolveName { name } => {
            let init = build_context(cli);
            let Some(code) = init.resolve_name(&name) else {
                bail!("language name must not be blank");
            };
            writeln!(out, "{code}")?;
        }
        Commands::Info(args) => {
            let mut init = build_context(cli);
            let mut registry = MemoryRegistry::new();
            init.load(&mut registry);
            write_info(&init, &args, out)?;
        }
    }
    Ok(())
}

/// Build a configuration context from the command-line options.
///
/// `--locale` is requested as the active locale; `load` keeps it only when
/// it is among the derived available locales.
#[must_use]
pub fn build_context(cli: &Cli) -> LocaleInit {
    let mut builder = LocaleInit::builder();
    if let Some(path) = &cli.config {
        builder = builder.config_file(path.clone());
    }
    if let Some(root) = &cli.root {
        builder = builder.root_path(root.clone());
    }
    if let Some(bundled) = &cli.bundled {
        builder = builder.bundled_settings_file(bundled.clone());
    }
    if let Some(environment) = &cli.environment {
        builder = builder.environment(environment.clone());
    }
    for pattern in &cli.load_path {
        builder = builder.load_path(pattern.clone());
    }
    let mut init = builder.build();
    init.set_ignore_settings_file(cli.ignore_settings_file);
    init.set_ignore_bundled_settings(cli.ignore_bundled_settings);
    if let Some(locale) = cli.locale.as_deref().and_then(LocaleCode::new) {
        debug!(%locale, "requested active locale");
        init.set_locale(locale);
    }
    init
}

fn write_info(init: &LocaleInit, args: &InfoArgs, out: &mut impl Write) -> Result<()> {
    let Some(state) = init.loaded() else {
        bail!("configuration has not been loaded");
    };
    if args.json {
        let report = InfoReport {
            framework: init.framework_name(),
            sources: init.settings_info(),
            state,
        };
        serde_json::to_writer_pretty(&mut *out, &report).context("failed to encode report")?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "Settings: {}", init.settings_info())?;
    writeln!(out, "Default locale: {} ({})", state.default_locale, state.default_language())?;
    writeln!(out, "Active locale: {} ({})", state.locale, state.language_name())?;
    writeln!(out, "Available locales:")?;
    for line in state.list_available_locales() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out, "Fallbacks:")?;
    for line in state.list_fallbacks() {
        writeln!(out, "  {}", line.trim_end())?;
    }
    if !state.rtl.is_empty() {
        let rtl: Vec<&str> = state.rtl.iter().map(LocaleCode::as_str).collect();
        writeln!(out, "RTL locales: {}", rtl.join(", "))?;
    }
    if !state.load_path.is_empty() {
        writeln!(out, "Load path:")?;
        for path in &state.load_path {
            writeln!(out, "  - {path}")?;
        }
    }
    Ok(())
}
