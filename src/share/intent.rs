//! Share requests and their permission flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::Serialize;

use super::uri::ContentUri;

/// Standard action for opening a file in another application.
pub const ACTION_VIEW: &str = "android.intent.action.VIEW";

/// Standard action for sending a file to another application.
pub const ACTION_SEND: &str = "android.intent.action.SEND";

/// Permission bits attached to a request or a grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntentFlags(u32);

impl IntentFlags {
    /// No flags.
    pub const NONE: Self = Self(0);

    /// The receiver may read the URI's content.
    pub const GRANT_READ_URI_PERMISSION: Self = Self(0x0000_0001);

    /// The receiver may write the URI's content.
    pub const GRANT_WRITE_URI_PERMISSION: Self = Self(0x0000_0002);

    /// Read and write, the grant used for shared files.
    pub const GRANT_READ_WRITE: Self =
        Self(Self::GRANT_READ_URI_PERMISSION.0 | Self::GRANT_WRITE_URI_PERMISSION.0);

    /// Build flags from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bit value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `self` with every bit of `other` cleared.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Names of the known flags that are set.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::GRANT_READ_URI_PERMISSION) {
            names.push("GRANT_READ_URI_PERMISSION");
        }
        if self.contains(Self::GRANT_WRITE_URI_PERMISSION) {
            names.push("GRANT_WRITE_URI_PERMISSION");
        }
        names
    }
}

impl BitOr for IntentFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for IntentFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for IntentFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none)");
        }
        write!(f, "{}", self.names().join(" | "))
    }
}

impl Serialize for IntentFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

/// A request asking another application to act on a file.
///
/// Only the parts needed for file sharing are modelled: an action, the data
/// URI with its MIME type, and the permission flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Intent {
    action: Option<String>,
    data: Option<ContentUri>,
    #[serde(rename = "type")]
    mime_type: Option<String>,
    flags: IntentFlags,
}

impl Intent {
    /// Create a request for `action` with no data and no flags.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::default()
        }
    }

    /// Set the data URI and its MIME type together.
    pub fn set_data_and_type(&mut self, data: ContentUri, mime_type: impl Into<String>) -> &mut Self {
        self.data = Some(data);
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Replace all flags.
    pub const fn set_flags(&mut self, flags: IntentFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    /// Add flags to the ones already set.
    pub fn add_flags(&mut self, flags: IntentFlags) -> &mut Self {
        self.flags |= flags;
        self
    }

    /// The action, if any.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// The data URI, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&ContentUri> {
        self.data.as_ref()
    }

    /// The MIME type of the data, if any.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// The current flags.
    #[must_use]
    pub const fn flags(&self) -> IntentFlags {
        self.flags
    }
}
