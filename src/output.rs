//! Structured JSON output for scripting and piping.
//!
//! When the `--json` flag is passed, these structures are serialized to
//! stdout as a single JSON object, replacing all human-readable output.

use std::path::Path;

use serde::Serialize;

use crate::cleaner::{ClearReport, readable_size};
use crate::share::{ContentUri, Intent};
use crate::utils::readable_file_size;

/// Output of `share`.
#[derive(Debug, Serialize)]
pub struct JsonShareOutput {
    /// The file that was shared, as given.
    pub file: String,

    /// Provider authority the URI was minted under.
    pub authority: String,

    /// The resulting request.
    pub intent: Intent,
}

impl JsonShareOutput {
    /// Build the output for a shared file.
    #[must_use]
    pub fn new(file: &Path, authority: String, intent: Intent) -> Self {
        Self {
            file: file.display().to_string(),
            authority,
            intent,
        }
    }
}

/// Output of `resolve`.
#[derive(Debug, Serialize)]
pub struct JsonResolveOutput {
    /// The URI that was resolved.
    pub uri: ContentUri,

    /// The file it names.
    pub path: String,

    /// MIME type of the file.
    pub mime_type: String,
}

/// Output of `clear`.
#[derive(Debug, Serialize)]
pub struct JsonClearOutput {
    /// `"dry_run"` or `"clear"`.
    pub mode: String,

    /// The directory that was cleared.
    pub dir: String,

    /// Number of direct entries found before clearing.
    pub entries: usize,

    /// Number of direct entries removed.
    pub removed: usize,

    /// Entries still present afterwards.
    pub remaining: Vec<String>,

    /// Size before clearing, in bytes.
    pub total_size: u64,

    /// Human-readable size before clearing (e.g. `"1.5 MB"`).
    pub total_size_formatted: String,

    /// Bytes freed.
    pub freed: u64,

    /// Human-readable freed size.
    pub freed_formatted: String,
}

impl From<&ClearReport> for JsonClearOutput {
    fn from(report: &ClearReport) -> Self {
        Self {
            mode: if report.dry_run { "dry_run" } else { "clear" }.to_string(),
            dir: report.dir.display().to_string(),
            entries: report.entries,
            removed: report.removed,
            remaining: report
                .remaining
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            total_size: report.total_size,
            total_size_formatted: readable_size(report.total_size),
            freed: report.freed,
            freed_formatted: readable_size(report.freed),
        }
    }
}

/// One line of `size` output.
#[derive(Debug, Serialize)]
pub struct JsonSizeEntry {
    /// The byte count given.
    pub bytes: i64,

    /// Its human-readable form.
    pub formatted: String,
}

impl JsonSizeEntry {
    /// Format `bytes` with [`readable_file_size`].
    #[must_use]
    pub fn new(bytes: i64) -> Self {
        Self {
            bytes,
            formatted: readable_file_size(bytes),
        }
    }
}
