//! The content-resolution service.
//!
//! [`ContentResolver`] is the seam between the sharing helpers and whatever
//! hands out content URIs and permission grants. [`LocalResolver`] is the
//! in-process implementation: a registry of [`FileProvider`]s keyed by
//! authority plus a table of granted permissions.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::error::ShareError;
use super::intent::IntentFlags;
use super::provider::FileProvider;
use super::uri::ContentUri;

/// Service that mints content URIs, reports their types, and records grants.
pub trait ContentResolver: fmt::Debug + Send + Sync {
    /// Mint a content URI for `file` under `authority`.
    ///
    /// # Errors
    ///
    /// Fails if no provider serves `authority` or the provider cannot share the file.
    fn uri_for_file(&self, authority: &str, file: &Path) -> Result<ContentUri, ShareError>;

    /// Resolve a content URI back to the file it names.
    ///
    /// # Errors
    ///
    /// Fails if the URI's authority or root is unknown, or the path escapes its root.
    fn file_for_uri(&self, uri: &ContentUri) -> Result<PathBuf, ShareError>;

    /// MIME type of the content behind `uri`.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`ContentResolver::file_for_uri`].
    fn get_type(&self, uri: &ContentUri) -> Result<String, ShareError>;

    /// Grant `grantee` the permissions in `flags` on `uri`.
    fn grant_uri_permission(&self, grantee: &str, uri: &ContentUri, flags: IntentFlags);

    /// Remove the permissions in `flags` on `uri` from every grantee.
    fn revoke_uri_permission(&self, uri: &ContentUri, flags: IntentFlags);

    /// Whether `grantee` holds every permission in `flags` on `uri`.
    fn has_permission(&self, grantee: &str, uri: &ContentUri, flags: IntentFlags) -> bool;
}

/// In-process [`ContentResolver`] backed by registered providers.
#[derive(Debug, Default)]
pub struct LocalResolver {
    providers: HashMap<String, FileProvider>,
    grants: Mutex<HashMap<(String, ContentUri), IntentFlags>>,
}

impl LocalResolver {
    /// Create a resolver with no providers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own authority, replacing any previous one.
    #[must_use]
    pub fn with_provider(mut self, provider: FileProvider) -> Self {
        self.register(provider);
        self
    }

    /// Register a provider under its own authority, replacing any previous one.
    pub fn register(&mut self, provider: FileProvider) {
        self.providers
            .insert(provider.authority().to_string(), provider);
    }

    /// The provider serving `authority`, if any.
    #[must_use]
    pub fn provider(&self, authority: &str) -> Option<&FileProvider> {
        self.providers.get(authority)
    }

    /// Number of `(grantee, uri)` pairs holding at least one permission.
    #[must_use]
    pub fn grant_count(&self) -> usize {
        self.grants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn provider_for(&self, authority: &str) -> Result<&FileProvider, ShareError> {
        self.provider(authority)
            .ok_or_else(|| ShareError::UnknownAuthority(authority.to_string()))
    }
}

impl ContentResolver for LocalResolver {
    fn uri_for_file(&self, authority: &str, file: &Path) -> Result<ContentUri, ShareError> {
        self.provider_for(authority)?.uri_for_file(file)
    }

    fn file_for_uri(&self, uri: &ContentUri) -> Result<PathBuf, ShareError> {
        self.provider_for(uri.authority())?.file_for_uri(uri)
    }

    fn get_type(&self, uri: &ContentUri) -> Result<String, ShareError> {
        self.provider_for(uri.authority())?.get_type(uri)
    }

    fn grant_uri_permission(&self, grantee: &str, uri: &ContentUri, flags: IntentFlags) {
        if flags.is_empty() {
            return;
        }
        *self
            .grants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((grantee.to_string(), uri.clone()))
            .or_default() |= flags;
    }

    fn revoke_uri_permission(&self, uri: &ContentUri, flags: IntentFlags) {
        self.grants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(_, granted_uri), granted| {
                if granted_uri == uri {
                    *granted = granted.difference(flags);
                }
                !granted.is_empty()
            });
    }

    fn has_permission(&self, grantee: &str, uri: &ContentUri, flags: IntentFlags) -> bool {
        self.grants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(grantee.to_string(), uri.clone()))
            .is_some_and(|granted| granted.contains(flags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::provider::ProviderRoot;
    use std::fs;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    const AUTHORITY: &str = "me.example.app.provider";

    fn resolver_for(dir: &TempDir) -> LocalResolver {
        let provider =
            FileProvider::new(AUTHORITY, [ProviderRoot::new("files", dir.path())]).unwrap();
        LocalResolver::new().with_provider(provider)
    }

    fn sample_uri() -> ContentUri {
        ContentUri::new(AUTHORITY, vec!["files".to_string(), "a.txt".to_string()])
    }

    #[test]
    fn test_unknown_authority() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_for(&dir);
        let file = dir.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        let err = resolver.uri_for_file("other.provider", &file).unwrap_err();
        assert!(matches!(err, ShareError::UnknownAuthority(ref a) if a == "other.provider"));

        let foreign = ContentUri::new("other.provider", vec!["files".to_string()]);
        assert!(resolver.get_type(&foreign).is_err());
    }

    #[test]
    fn test_uri_and_type_through_resolver() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_for(&dir);
        let file = dir.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        let uri = resolver.uri_for_file(AUTHORITY, &file).unwrap();
        assert_eq!(uri, sample_uri());
        assert_eq!(resolver.get_type(&uri).unwrap(), "text/plain");
        assert_eq!(
            resolver.file_for_uri(&uri).unwrap(),
            fs::canonicalize(&file).unwrap()
        );
    }

    #[test]
    fn test_grants_accumulate() {
        let resolver = LocalResolver::new();
        let uri = sample_uri();

        resolver.grant_uri_permission("pkg", &uri, IntentFlags::GRANT_READ_URI_PERMISSION);
        assert!(resolver.has_permission("pkg", &uri, IntentFlags::GRANT_READ_URI_PERMISSION));
        assert!(!resolver.has_permission("pkg", &uri, IntentFlags::GRANT_READ_WRITE));

        resolver.grant_uri_permission("pkg", &uri, IntentFlags::GRANT_WRITE_URI_PERMISSION);
        assert!(resolver.has_permission("pkg", &uri, IntentFlags::GRANT_READ_WRITE));
        assert!(!resolver.has_permission("someone.else", &uri, IntentFlags::GRANT_READ_URI_PERMISSION));
        assert_eq!(resolver.grant_count(), 1);
    }

    #[test]
    fn test_empty_grant_is_not_recorded() {
        let resolver = LocalResolver::new();
        resolver.grant_uri_permission("pkg", &sample_uri(), IntentFlags::NONE);
        assert_eq!(resolver.grant_count(), 0);
    }

    #[test]
    fn test_revoke() {
        let resolver = LocalResolver::new();
        let uri = sample_uri();
        resolver.grant_uri_permission("a", &uri, IntentFlags::GRANT_READ_WRITE);
        resolver.grant_uri_permission("b", &uri, IntentFlags::GRANT_READ_URI_PERMISSION);

        resolver.revoke_uri_permission(&uri, IntentFlags::GRANT_WRITE_URI_PERMISSION);
        assert!(resolver.has_permission("a", &uri, IntentFlags::GRANT_READ_URI_PERMISSION));
        assert!(!resolver.has_permission("a", &uri, IntentFlags::GRANT_WRITE_URI_PERMISSION));
        assert_eq!(resolver.grant_count(), 2);

        resolver.revoke_uri_permission(&uri, IntentFlags::GRANT_READ_URI_PERMISSION);
        assert_eq!(resolver.grant_count(), 0);
    }

    #[test]
    fn test_concurrent_grants() {
        let resolver = Arc::new(LocalResolver::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || {
                    let uri = ContentUri::new(AUTHORITY, vec![format!("file{i}")]);
                    resolver.grant_uri_permission("pkg", &uri, IntentFlags::GRANT_READ_WRITE);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(resolver.grant_count(), 8);
    }
}
