//! Mapping between files on disk and content URIs.
//!
//! A [`FileProvider`] owns one authority and a set of named roots. A file can
//! be shared only when its canonical path lies below one of those roots; the
//! URI then carries the root's name followed by the path relative to it, so
//! the real directory layout is never exposed to the receiving application.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::error::ShareError;
use super::mime::mime_type_for;
use super::uri::ContentUri;

/// A named directory whose contents may be shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderRoot {
    /// Name used as the first URI path segment
    pub name: String,

    /// Directory on disk
    pub path: PathBuf,
}

impl ProviderRoot {
    /// Create a root named `name` at `path`.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Mints and resolves content URIs for a single authority.
#[derive(Clone, Debug)]
pub struct FileProvider {
    authority: String,
    roots: Vec<ProviderRoot>,
}

impl FileProvider {
    /// Create a provider for `authority` serving the given roots.
    ///
    /// Root paths are canonicalized here so later lookups compare resolved
    /// paths on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidRoot`] if a root has an empty name, a name
    /// used twice, or a path that cannot be canonicalized.
    pub fn new(
        authority: impl Into<String>,
        roots: impl IntoIterator<Item = ProviderRoot>,
    ) -> Result<Self, ShareError> {
        let mut canonical_roots: Vec<ProviderRoot> = Vec::new();

        for root in roots {
            let invalid = |reason: String| ShareError::InvalidRoot {
                name: root.name.clone(),
                path: root.path.clone(),
                reason,
            };

            if root.name.is_empty() {
                return Err(invalid("name must not be empty".to_string()));
            }
            if canonical_roots.iter().any(|r| r.name == root.name) {
                return Err(invalid("name is already in use".to_string()));
            }

            let path = fs::canonicalize(&root.path).map_err(|e| invalid(e.to_string()))?;
            canonical_roots.push(ProviderRoot::new(root.name, path));
        }

        Ok(Self {
            authority: authority.into(),
            roots: canonical_roots,
        })
    }

    /// The authority this provider answers for.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Build the content URI for `file`.
    ///
    /// The file is canonicalized first, then matched against the root with the
    /// longest path that contains it.
    ///
    /// # Errors
    ///
    /// - [`ShareError::Io`] if the file does not exist or cannot be resolved
    /// - [`ShareError::OutsideRoots`] if no root contains the file
    /// - [`ShareError::NonUnicodePath`] if the relative path is not valid Unicode
    pub fn uri_for_file(&self, file: &Path) -> Result<ContentUri, ShareError> {
        let canonical = fs::canonicalize(file).map_err(|source| ShareError::Io {
            path: file.to_path_buf(),
            source,
        })?;

        let root = self
            .roots
            .iter()
            .filter(|root| canonical.starts_with(&root.path))
            .max_by_key(|root| root.path.components().count())
            .ok_or_else(|| ShareError::OutsideRoots {
                path: canonical.clone(),
            })?;

        let mut segments = vec![root.name.clone()];
        // starts_with was checked above
        let relative = canonical.strip_prefix(&root.path).unwrap_or(Path::new(""));
        for component in relative.components() {
            let segment = component
                .as_os_str()
                .to_str()
                .ok_or_else(|| ShareError::NonUnicodePath {
                    path: canonical.clone(),
                })?;
            segments.push(segment.to_string());
        }

        Ok(ContentUri::new(self.authority.clone(), segments))
    }

    /// Resolve a content URI back to the file it names.
    ///
    /// The file does not have to exist, but the path must stay below its root.
    /// Whatever part of it does exist is canonicalized, so a symlink inside the
    /// root that leads out of it is rejected.
    ///
    /// # Errors
    ///
    /// - [`ShareError::UnknownAuthority`] if the URI belongs to another authority
    /// - [`ShareError::UnknownRoot`] if the root name is missing or not configured
    /// - [`ShareError::PathTraversal`] if a segment would leave the root
    pub fn file_for_uri(&self, uri: &ContentUri) -> Result<PathBuf, ShareError> {
        if uri.authority() != self.authority {
            return Err(ShareError::UnknownAuthority(uri.authority().to_string()));
        }

        let root = uri
            .root_name()
            .and_then(|name| self.roots.iter().find(|root| root.name == name))
            .ok_or_else(|| ShareError::UnknownRoot(uri.to_string()))?;

        let mut path = root.path.clone();
        for segment in uri.relative_segments() {
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(part)), None) => path.push(part),
                _ => return Err(ShareError::PathTraversal(uri.to_string())),
            }
        }

        if !stays_under(&path, &root.path) {
            return Err(ShareError::PathTraversal(uri.to_string()));
        }

        Ok(path)
    }

    /// MIME type of the file a URI names, judged by its extension.
    ///
    /// # Errors
    ///
    /// Same as [`FileProvider::file_for_uri`].
    pub fn get_type(&self, uri: &ContentUri) -> Result<String, ShareError> {
        let file = self.file_for_uri(uri)?;
        Ok(mime_type_for(&file).to_string())
    }
}

/// Whether the deepest existing ancestor of `path` canonicalizes to a location
/// below `root`. A dangling symlink counts as leaving the root.
fn stays_under(path: &Path, root: &Path) -> bool {
    path.ancestors()
        .find(|ancestor| fs::symlink_metadata(ancestor).is_ok())
        .is_some_and(|existing| {
            fs::canonicalize(existing).is_ok_and(|real| real.starts_with(root))
        })
}
