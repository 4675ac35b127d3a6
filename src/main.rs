//! # fileshare
//!
//! A small CLI for handing files to other applications through content URIs,
//! clearing out scratch directories, and formatting byte counts.
//!
//! ## Usage
//!
//! ```bash
//! # Build a share request for a file under the configured roots
//! fileshare share ~/Downloads/cat.png --package me.example.app --root downloads=~/Downloads
//!
//! # Map a content URI back to its file
//! fileshare resolve content://me.example.app.provider/downloads/cat.png -p me.example.app
//!
//! # Delete the direct children of a directory
//! fileshare clear /tmp/cache --yes
//!
//! # Format byte counts
//! fileshare size 1536 1073741824
//! ```

mod cli;

use std::path::Path;
use std::process::exit;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{ClearArgs, Cli, Commands, ConfigCommand, ResolveArgs, ShareArgs};
use colored::Colorize;
use fileshare::{
    cleaner::Cleaner,
    config::{FileConfig, ShareOptions},
    output::{JsonClearOutput, JsonResolveOutput, JsonShareOutput, JsonSizeEntry},
    readable_file_size,
    share::{ContentUri, Intent, file_intent},
};
use inquire::Confirm;

/// Entry point for the fileshare application.
///
/// Errors from [`inner_main`] are printed to stderr before exiting with a
/// non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Parse arguments, load the config file and dispatch the subcommand.
fn inner_main() -> Result<()> {
    let args = Cli::parse();
    let json_mode = args.json();

    match &args.command {
        Commands::Config { command } => handle_config_command(command),
        Commands::Size(size) => print_sizes(&size.bytes, json_mode),
        Commands::Share(share) => run_share(share, &load_config(json_mode), json_mode),
        Commands::Resolve(resolve) => run_resolve(resolve, &load_config(json_mode), json_mode),
        Commands::Clear(clear) => run_clear(clear, &load_config(json_mode), json_mode),
    }
}

// ── Subcommands ─────────────────────────────────────────────────────────

/// Build the share request for a file and print it.
fn run_share(args: &ShareArgs, config: &FileConfig, json_mode: bool) -> Result<()> {
    let options = args.share_options(config);
    let ctx = options.context()?;

    let mut intent = Intent::new(options.action.as_str());
    file_intent(&args.file, &mut intent, &ctx)?;

    if json_mode {
        let output = JsonShareOutput::new(&args.file, ctx.authority(), intent);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "🔗 Shared file".bold());
    println!("  File:      {}", args.file.display());
    println!(
        "  URI:       {}",
        intent
            .data()
            .map(ToString::to_string)
            .unwrap_or_default()
            .bright_green()
    );
    println!("  Type:      {}", intent.mime_type().unwrap_or_default());
    println!("  Action:    {}", intent.action().unwrap_or_default());
    println!("  Flags:     {}", intent.flags());
    println!("  Granted:   read + write to {}", ctx.authority().cyan());
    Ok(())
}

/// Map a content URI back to its file and print it.
fn run_resolve(args: &ResolveArgs, config: &FileConfig, json_mode: bool) -> Result<()> {
    let ctx = args.share_options(config).context()?;
    let uri: ContentUri = args.uri.parse()?;

    let path = ctx.resolver().file_for_uri(&uri)?;
    let mime_type = ctx.resolver().get_type(&uri)?;

    if json_mode {
        let output = JsonResolveOutput {
            uri,
            path: path.display().to_string(),
            mime_type,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", path.display());
    if !path.exists() {
        eprintln!("{}", "Warning: the file does not exist".yellow());
    }
    println!("  Type: {mime_type}");
    Ok(())
}

/// Clear a directory after confirmation, and print what happened.
fn run_clear(args: &ClearArgs, config: &FileConfig, json_mode: bool) -> Result<()> {
    let options = args.clear_options(config);

    if options.confirm && !options.dry_run {
        if json_mode {
            bail!("--json cannot prompt for confirmation; pass --yes");
        }

        let confirmed = Confirm::new(&format!(
            "Delete everything directly inside {}?",
            args.dir.display()
        ))
        .with_default(false)
        .prompt()?;

        if !confirmed {
            println!("{}", "✨ Nothing deleted.".green());
            return Ok(());
        }
    }

    let report = Cleaner::clear(&args.dir, options.dry_run)?;

    if json_mode {
        let output = JsonClearOutput::from(&report);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        Cleaner::print_summary(&report);
    }

    Ok(())
}

/// Print each byte count in human-readable form.
fn print_sizes(bytes: &[i64], json_mode: bool) -> Result<()> {
    if json_mode {
        let output: Vec<JsonSizeEntry> = bytes.iter().copied().map(JsonSizeEntry::new).collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for &count in bytes {
        println!("{count}\t{}", readable_file_size(count));
    }
    Ok(())
}

// ── Config subcommand ───────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# fileshare configuration
# All values shown are their defaults. Uncomment and change as needed.

# Package name; content URIs use the authority "<package_name>.provider"
# package_name = "fileshare"

[share]
# Action put on share requests
# action = "android.intent.action.VIEW"

# Directories whose files may be shared. Without any, the current directory
# is shared under the name "files".
# [[share.roots]]
# name = "downloads"
# path = "~/Downloads"

[clear]
# Only list what would be removed
# dry_run = false

# Ask before deleting
# confirm = true
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load_from(p)?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let defaults = ShareOptions::default();
    let roots = config.provider_roots().map_or_else(
        || {
            defaults
                .roots
                .iter()
                .map(|r| format!("{} = \"{}\"  (default)", r.name, r.path.display()))
                .collect::<Vec<_>>()
        },
        |roots| {
            roots
                .iter()
                .map(|r| format!("{} = \"{}\"", r.name, r.path.display()))
                .collect()
        },
    );

    format!(
        "\
package_name  = {package_name}

[share]
action        = {action}
roots:
  {roots}

[clear]
dry_run       = {dry_run}
confirm       = {confirm}",
        package_name = show_str(config.package_name.as_deref(), &defaults.package_name),
        action = show_str(config.share.action.as_deref(), &defaults.action),
        roots = roots.join("\n  "),
        dry_run = show_bool(config.clear.dry_run, false),
        confirm = show_bool(config.clear.confirm, true),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    write_config_template(&path)?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Write [`CONFIG_TEMPLATE`] to `path`, creating parent directories.
fn write_config_template(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();

        assert!(config.package_name.is_none());
        assert!(config.share.action.is_none());
        assert!(config.provider_roots().is_none());
        assert!(config.clear.dry_run.is_none());
        assert!(config.clear.confirm.is_none());
    }

    #[test]
    fn test_format_config_shows_defaults() {
        let text = format_config(&FileConfig::default());

        assert!(text.contains("package_name  = \"fileshare\"  (default)"));
        assert!(text.contains("files = \".\"  (default)"));
        assert!(text.contains("confirm       = true  (default)"));
    }

    #[test]
    fn test_format_config_shows_file_values() {
        let config: FileConfig = toml::from_str(
            "package_name = \"me.example.app\"\n[[share.roots]]\nname = \"dl\"\npath = \"/data/dl\"\n",
        )
        .unwrap();
        let text = format_config(&config);

        assert!(text.contains("package_name  = \"me.example.app\""));
        assert!(text.contains("dl = \"/data/dl\""));
        assert!(!text.contains("files = "));
    }

    #[test]
    fn test_write_config_template() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_config_template(&path).unwrap();

        let loaded = FileConfig::load_from(&path).unwrap();
        assert!(loaded.package_name.is_none());
    }
}
