//! Command-line interface definition and argument parsing.
//!
//! This module defines all subcommands, arguments and options using the
//! [clap](https://docs.rs/clap/) library.
//!
//! Helper methods accept a [`FileConfig`] reference so that config-file values
//! act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use fileshare::config::file::FileConfig;
use fileshare::config::{ClearOptions, ShareOptions};
use fileshare::share::ProviderRoot;

/// Arguments describing the application whose provider shares the file.
#[derive(Args, Debug)]
pub(crate) struct ProviderArgs {
    /// Package name; the provider authority is `<PACKAGE>.provider`
    #[arg(short = 'p', long)]
    package: Option<String>,

    /// A directory the provider may share from, as NAME=PATH
    ///
    /// Can be given several times. When set, replaces the roots from the
    /// config file. Without any roots, the current directory is shared under
    /// the name `files`.
    #[arg(short = 'r', long = "root", value_parser = parse_root, action = clap::ArgAction::Append)]
    roots: Vec<ProviderRoot>,
}

/// Arguments for `share`.
#[derive(Args, Debug)]
pub(crate) struct ShareArgs {
    /// File to share
    pub(crate) file: PathBuf,

    /// Action to put on the request (e.g. android.intent.action.SEND)
    #[arg(short = 'a', long)]
    action: Option<String>,

    /// Provider options
    #[command(flatten)]
    provider: ProviderArgs,
}

/// Arguments for `resolve`.
#[derive(Args, Debug)]
pub(crate) struct ResolveArgs {
    /// content:// URI to resolve
    pub(crate) uri: String,

    /// Provider options
    #[command(flatten)]
    provider: ProviderArgs,
}

/// Arguments for `clear`.
#[derive(Args, Debug)]
pub(crate) struct ClearArgs {
    /// Directory whose direct children are deleted
    pub(crate) dir: PathBuf,

    /// List what would be removed without deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Don't ask for confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

/// Arguments for `size`.
#[derive(Args, Debug)]
pub(crate) struct SizeArgs {
    /// Byte counts to format
    #[arg(required = true, allow_negative_numbers = true)]
    pub(crate) bytes: Vec<i64>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Build a share request for a file and grant read/write on its content URI
    Share(ShareArgs),

    /// Map a content URI back to the file it names
    Resolve(ResolveArgs),

    /// Delete the direct children of a directory (not recursive)
    Clear(ClearArgs),

    /// Format byte counts as human-readable sizes
    Size(SizeArgs),

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug)]
pub(crate) enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser, Debug)]
#[command(name = "fileshare")]
#[command(about = "Share files through content URIs, clear directories, and format byte sizes")]
#[command(version)]
pub(crate) struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, all human-readable output (colors, emojis) is suppressed
    /// and a single JSON document is printed to stdout.
    #[arg(long, global = true)]
    json: bool,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub(crate) const fn json(&self) -> bool {
        self.json
    }
}

impl ProviderArgs {
    /// Resolve sharing options from CLI args and config file.
    ///
    /// - **package**: CLI > config > `fileshare`
    /// - **roots**: CLI (if any) > config (if any) > `files` at `.`
    /// - **action**: `action` > config > `android.intent.action.VIEW`
    #[must_use]
    pub(crate) fn share_options(&self, action: Option<&str>, config: &FileConfig) -> ShareOptions {
        let defaults = ShareOptions::default();

        let roots = if self.roots.is_empty() {
            config.provider_roots().unwrap_or(defaults.roots)
        } else {
            self.roots.clone()
        };

        ShareOptions {
            package_name: self
                .package
                .clone()
                .or_else(|| config.package_name.clone())
                .unwrap_or(defaults.package_name),
            action: action
                .map(str::to_string)
                .or_else(|| config.share.action.clone())
                .unwrap_or(defaults.action),
            roots,
        }
    }
}

impl ShareArgs {
    /// Sharing options for this invocation.
    #[must_use]
    pub(crate) fn share_options(&self, config: &FileConfig) -> ShareOptions {
        self.provider.share_options(self.action.as_deref(), config)
    }
}

impl ResolveArgs {
    /// Sharing options for this invocation.
    #[must_use]
    pub(crate) fn share_options(&self, config: &FileConfig) -> ShareOptions {
        self.provider.share_options(None, config)
    }
}

impl ClearArgs {
    /// Resolve clear options from CLI args and config file.
    ///
    /// - **`dry_run`**: CLI flag `||` config value `||` `false`
    /// - **confirm**: `false` with `--yes`, otherwise config value or `true`
    #[must_use]
    pub(crate) fn clear_options(&self, config: &FileConfig) -> ClearOptions {
        ClearOptions {
            dry_run: self.dry_run || config.clear.dry_run.unwrap_or(false),
            confirm: !self.yes && config.clear.confirm.unwrap_or(true),
        }
    }
}

/// Parse a `NAME=PATH` root specification.
fn parse_root(value: &str) -> Result<ProviderRoot, String> {
    match value.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok(ProviderRoot::new(name, path))
        }
        _ => Err(format!("expected NAME=PATH, got `{value}`")),
    }
}
