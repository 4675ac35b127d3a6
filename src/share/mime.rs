//! MIME type lookup by file extension.

use std::ffi::OsStr;
use std::path::Path;

/// Type reported for files whose extension is missing or unknown.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Known extensions (lowercase) and their MIME types.
const MIME_TYPES: &[(&str, &str)] = &[
    // Images
    ("bmp", "image/bmp"),
    ("gif", "image/gif"),
    ("heic", "image/heic"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    // Video
    ("3gp", "video/3gpp"),
    ("mkv", "video/x-matroska"),
    ("mov", "video/quicktime"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    // Audio
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("wav", "audio/x-wav"),
    // Text
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("js", "text/javascript"),
    ("md", "text/markdown"),
    ("txt", "text/plain"),
    ("xml", "text/xml"),
    // Documents and archives
    ("apk", "application/vnd.android.package-archive"),
    ("gz", "application/gzip"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
];

/// MIME type for a file extension, matched case-insensitively.
#[must_use]
pub fn mime_type_for_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// MIME type for a file name or path, falling back to [`DEFAULT_MIME_TYPE`].
#[must_use]
pub fn mime_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(OsStr::to_str)
        .and_then(mime_type_for_extension)
        .unwrap_or(DEFAULT_MIME_TYPE)
}
