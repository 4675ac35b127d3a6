//! Content URIs and the percent-encoding of their path segments.
//!
//! A content URI has the shape `content://<authority>/<root>/<path...>`. The
//! authority identifies the provider, the first path segment names one of its
//! roots, and the remaining segments locate the file below that root.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::error::ShareError;

/// Scheme prefix of every content URI.
pub const CONTENT_SCHEME: &str = "content://";

/// A `content://` URI that identifies a shared file.
///
/// Path segments are kept decoded; [`fmt::Display`] produces the encoded form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentUri {
    authority: String,
    segments: Vec<String>,
}

impl ContentUri {
    /// Build a URI from an authority and decoded path segments.
    #[must_use]
    pub fn new(authority: impl Into<String>, segments: Vec<String>) -> Self {
        Self {
            authority: authority.into(),
            segments,
        }
    }

    /// The provider authority, e.g. `me.example.app.provider`.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// All decoded path segments, root name first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Name of the provider root this URI points into.
    #[must_use]
    pub fn root_name(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Decoded segments below the root.
    #[must_use]
    pub fn relative_segments(&self) -> &[String] {
        self.segments.get(1..).unwrap_or_default()
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CONTENT_SCHEME}{}", self.authority)?;
        for segment in &self.segments {
            write!(f, "/{}", encode(segment))?;
        }
        Ok(())
    }
}

impl FromStr for ContentUri {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ShareError::InvalidUri {
            uri: s.to_string(),
            reason,
        };

        let rest = s
            .strip_prefix(CONTENT_SCHEME)
            .ok_or_else(|| invalid("scheme must be content://"))?;

        if rest.contains(['?', '#']) {
            return Err(invalid("query and fragment are not supported"));
        }

        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        if authority.is_empty() {
            return Err(invalid("missing authority"));
        }

        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| decode(segment).ok_or_else(|| invalid("malformed percent-encoding")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(authority, segments))
    }
}

impl Serialize for ContentUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether `byte` is left as-is when encoding a segment.
const fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(byte, b'_' | b'-' | b'!' | b'.' | b'~' | b'\'' | b'(' | b')' | b'*')
}

/// Percent-encode a single path segment (UTF-8, uppercase hex).
#[must_use]
pub fn encode(segment: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(segment.len());
    for &byte in segment.as_bytes() {
        if is_unreserved(byte) {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX[usize::from(byte >> 4)]));
            out.push(char::from(HEX[usize::from(byte & 0x0f)]));
        }
    }
    out
}

/// Decode a percent-encoded segment.
///
/// Returns `None` for truncated escapes, non-hex digits, or bytes that do not
/// form valid UTF-8.
#[must_use]
pub fn decode(segment: &str) -> Option<String> {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = segment.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}
