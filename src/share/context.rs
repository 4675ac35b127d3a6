//! The calling application's view of the sharing service.

use std::sync::Arc;

use super::resolver::ContentResolver;

/// Suffix appended to a package name to form its provider authority.
pub const AUTHORITY_SUFFIX: &str = ".provider";

/// Provider authority for a package, `<package_name>.provider`.
#[must_use]
pub fn authority_for(package_name: &str) -> String {
    format!("{package_name}{AUTHORITY_SUFFIX}")
}

/// Identity of the calling application plus its content resolver.
///
/// Cloning is cheap; the resolver is shared.
#[derive(Clone, Debug)]
pub struct Context {
    package_name: String,
    resolver: Arc<dyn ContentResolver>,
}

impl Context {
    /// Create a context for `package_name` backed by `resolver`.
    #[must_use]
    pub fn new(package_name: impl Into<String>, resolver: Arc<dyn ContentResolver>) -> Self {
        Self {
            package_name: package_name.into(),
            resolver,
        }
    }

    /// The application's package name.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// The authority this application's provider is registered under.
    #[must_use]
    pub fn authority(&self) -> String {
        authority_for(&self.package_name)
    }

    /// The content resolver.
    #[must_use]
    pub fn resolver(&self) -> &dyn ContentResolver {
        self.resolver.as_ref()
    }
}
