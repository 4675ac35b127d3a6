//! Byte-size formatting and measurement utilities.
//!
//! This module turns byte counts into human-readable strings (like "3.5 MB")
//! and measures directory sizes on disk.

use std::path::Path;

use walkdir::WalkDir;

/// Total size in bytes of every regular file below `path`.
///
/// Entries that cannot be read are skipped. A missing `path` counts as `0`.
#[must_use]
pub fn calculate_dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Units used by [`readable_file_size`], one per power of 1024.
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Convert a byte count into a human-readable size.
///
/// The count is divided by the largest power of 1024 that fits in it and the
/// result is shown with at most one decimal place, thousands separators and a
/// unit abbreviation (`B`, `KB`, `MB`, `GB`, `TB`). Rounding is half-to-even on
/// the exact value, so no floating point is involved.
///
/// Zero and negative counts return the bare string `"0"` (no unit).
/// Counts of 1024 TB and above stay in `TB`, e.g. `"8,192 TB"`.
///
/// # Examples
///
/// ```
/// # use fileshare::utils::readable_file_size;
/// assert_eq!(readable_file_size(0), "0");
/// assert_eq!(readable_file_size(1023), "1,023 B");
/// assert_eq!(readable_file_size(1536), "1.5 KB");
/// assert_eq!(readable_file_size(1_073_741_824), "1 GB");
/// ```
#[must_use]
pub fn readable_file_size(size: i64) -> String {
    let Ok(size) = u64::try_from(size) else {
        return "0".to_string();
    };
    if size == 0 {
        return "0".to_string();
    }

    let order = digit_groups(size);
    let divisor = 1u128 << (10 * order);

    let scaled = u128::from(size) * 10;
    let mut tenths = scaled / divisor;
    let remainder = scaled % divisor;
    if remainder * 2 > divisor || (remainder * 2 == divisor && tenths % 2 == 1) {
        tenths += 1;
    }

    // tenths <= 10 * 2^63 / 1024, so it fits comfortably in a u64
    let whole = u64::try_from(tenths / 10).unwrap_or(u64::MAX);
    let fraction = tenths % 10;

    if fraction == 0 {
        format!("{} {}", format_with_commas(whole), UNITS[order])
    } else {
        format!("{}.{fraction} {}", format_with_commas(whole), UNITS[order])
    }
}

/// Integer base-1024 logarithm of `size`, clamped to the last entry of [`UNITS`].
const fn digit_groups(size: u64) -> usize {
    let mut order = 0;
    while order + 1 < UNITS.len() && size >> (10 * (order + 1)) != 0 {
        order += 1;
    }
    order
}

/// Format a number with `,` thousands separators (e.g. 1048576 -> "1,048,576").
#[must_use]
pub fn format_with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
