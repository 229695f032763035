//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and its subcommands.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Resolve and inspect layered locale configuration.
#[derive(Debug, Parser, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file to read instead of `<root>/locale.yml`.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Application root directory.
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<Utf8PathBuf>,

    /// Bundled defaults file to use instead of the built-in copy.
    #[arg(long, value_name = "FILE")]
    pub bundled: Option<Utf8PathBuf>,

    /// Environment section of the settings file to apply.
    #[arg(short, long, value_name = "NAME")]
    pub environment: Option<String>,

    /// Do not read the settings file.
    #[arg(long)]
    pub ignore_settings_file: bool,

    /// Do not read the bundled defaults.
    #[arg(long)]
    pub ignore_bundled_settings: bool,

    /// Locale to activate when it is available.
    #[arg(short, long, value_name = "TAG")]
    pub locale: Option<String>,

    /// Glob pattern for translation resources; may be repeated.
    #[arg(long = "load-path", value_name = "GLOB")]
    pub load_path: Vec<String>,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Optional subcommand to execute; defaults to `info` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse command-line arguments, providing `info` as the default command.
    #[must_use]
    pub fn parse_with_default() -> Self {
        Self::parse().with_default_command()
    }

    /// Apply the default command if none was specified.
    #[must_use]
    pub fn with_default_command(mut self) -> Self {
        if self.command.is_none() {
            self.command = Some(Commands::Info(InfoArgs::default()));
        }
        self
    }
}

/// Arguments accepted by the `info` command.
#[derive(Debug, Args, PartialEq, Eq, Clone, Default)]
pub struct InfoArgs {
    /// Print the loaded configuration as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Available top-level commands.
#[derive(Debug, Subcommand, PartialEq, Eq, Clone)]
pub enum Commands {
    /// Load the configuration and report it (default).
    Info(InfoArgs),

    /// Print the language name of a locale code.
    ResolveCode {
        /// Locale code to resolve.
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Print the locale code of a language name.
    ResolveName {
        /// Language name to resolve.
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Copy the bundled settings into a project directory.
    Install {
        /// Directory receiving `locale.yml`.
        #[arg(value_name = "DIR")]
        dir: Utf8PathBuf,

        /// Overwrite an existing settings file.
        #[arg(long)]
        force: bool,
    },
}
