//! Error types for content URI sharing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while minting, resolving or typing content URIs.
#[derive(Debug, Error)]
pub enum ShareError {
    /// No file provider is registered under the requested authority
    #[error("No file provider registered for authority `{0}`")]
    UnknownAuthority(String),

    /// A provider root could not be set up
    #[error("Invalid provider root `{name}` ({}): {reason}", path.display())]
    InvalidRoot {
        /// Name of the root as configured
        name: String,
        /// Path of the root as configured
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// The file could not be resolved on disk
    #[error("Failed to resolve {}: {source}", path.display())]
    Io {
        /// Path that was being resolved
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: io::Error,
    },

    /// The file exists but lies outside every configured root
    #[error("Failed to find configured root that contains {}", path.display())]
    OutsideRoots {
        /// Canonical path of the file
        path: PathBuf,
    },

    /// The file path cannot be expressed as a URI path
    #[error("Path is not valid Unicode: {}", path.display())]
    NonUnicodePath {
        /// Offending path
        path: PathBuf,
    },

    /// The URI names a root the provider does not know
    #[error("Unable to find configured root for {0}")]
    UnknownRoot(String),

    /// The URI path escapes its root
    #[error("Resolved path escapes the configured root: {0}")]
    PathTraversal(String),

    /// The string is not a well-formed content URI
    #[error("Invalid content URI `{uri}`: {reason}")]
    InvalidUri {
        /// The rejected input
        uri: String,
        /// Why it was rejected
        reason: &'static str,
    },
}
