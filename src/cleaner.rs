//! Directory content cleanup.
//!
//! [`delete_files_in_dir`] removes the direct children of a directory and
//! ignores entries it cannot remove. [`Cleaner`] wraps it for the command line,
//! measuring the directory before and after so a summary can be printed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::utils::{calculate_dir_size, readable_file_size};

/// Delete every direct child of `dir`.
///
/// Files and symlinks are unlinked; subdirectories are removed only if they
/// are already empty, since nothing is deleted recursively. Failures for
/// individual entries are ignored.
///
/// # Errors
///
/// Returns an error if `dir` cannot be listed (it does not exist, is not a
/// directory, or is not readable).
pub fn delete_files_in_dir(dir: &Path) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("Failed to list directory {}: {e}", dir.display()))?;

    for entry in entries.flatten() {
        let _ = remove_entry(&entry.path());
    }

    Ok(())
}

/// Remove a single entry without recursing into it.
fn remove_entry(path: &Path) -> io::Result<()> {
    // symlink_metadata: a link to a directory is unlinked, not followed
    if fs::symlink_metadata(path)?.file_type().is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

/// Direct children of `dir`, sorted by path.
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("Failed to list directory {}: {e}", dir.display()))?;

    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();
    Ok(paths)
}

/// Outcome of clearing a directory.
#[derive(Debug, Serialize)]
pub struct ClearReport {
    /// The directory that was cleared.
    pub dir: PathBuf,

    /// Whether this was a dry run (nothing deleted).
    pub dry_run: bool,

    /// Number of direct entries found before clearing.
    pub entries: usize,

    /// Number of direct entries that were removed.
    pub removed: usize,

    /// Entries still present afterwards (all of them in a dry run).
    pub remaining: Vec<PathBuf>,

    /// Size of the directory's files before clearing, in bytes.
    pub total_size: u64,

    /// Bytes actually freed (`0` in a dry run).
    pub freed: u64,
}

/// Clears directories and reports on the result.
#[derive(Debug, Default)]
pub struct Cleaner;

impl Cleaner {
    /// Clear the direct children of `dir`, or only list them if `dry_run`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be listed, before or after deleting.
    pub fn clear(dir: &Path, dry_run: bool) -> Result<ClearReport> {
        let before = list_entries(dir)?;
        let total_size = calculate_dir_size(dir);

        if dry_run {
            return Ok(ClearReport {
                dir: dir.to_path_buf(),
                dry_run,
                entries: before.len(),
                removed: 0,
                remaining: before,
                total_size,
                freed: 0,
            });
        }

        delete_files_in_dir(dir)?;

        let remaining = list_entries(dir)?;
        let freed = total_size.saturating_sub(calculate_dir_size(dir));

        Ok(ClearReport {
            dir: dir.to_path_buf(),
            dry_run,
            entries: before.len(),
            removed: before.len().saturating_sub(remaining.len()),
            remaining,
            total_size,
            freed,
        })
    }

    /// Print a human-readable summary of a [`ClearReport`] to stdout.
    pub fn print_summary(report: &ClearReport) {
        if report.dry_run {
            println!(
                "\n{} {}",
                "🧪 Dry run complete!".yellow(),
                format!(
                    "Would remove {} entries ({})",
                    report.entries,
                    readable_size(report.total_size)
                )
                .bright_white()
            );
            for path in &report.remaining {
                println!("  {}", path.display());
            }
            return;
        }

        println!("\n{}", "📊 Clear Summary:".bold());
        println!(
            "  ✅ Removed: {} of {} entries",
            report.removed.to_string().green(),
            report.entries
        );

        if !report.remaining.is_empty() {
            println!(
                "  ⚠️  Left in place: {} entries",
                report.remaining.len().to_string().yellow()
            );
            for path in &report.remaining {
                eprintln!("    {}", path.display().to_string().red());
            }
        }

        println!(
            "  💾 Space freed: {}",
            readable_size(report.freed).bright_green().bold()
        );
    }
}

/// [`readable_file_size`] for unsigned byte counts.
#[must_use]
pub fn readable_size(bytes: u64) -> String {
    readable_file_size(i64::try_from(bytes).unwrap_or(i64::MAX))
}
