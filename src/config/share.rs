//! Options controlling content URI sharing.
//!
//! [`ShareOptions`] carries everything needed to stand up a sharing
//! [`Context`]: the package name (and so the authority), the roots the
//! provider serves, and the action to put on new intents.

use std::path::PathBuf;
use std::sync::Arc;

use crate::share::{
    ACTION_VIEW, Context, FileProvider, LocalResolver, ProviderRoot, ShareError, authority_for,
};

/// Package name used when neither the CLI nor the config file sets one.
pub const DEFAULT_PACKAGE_NAME: &str = "fileshare";

/// Name of the root served when no roots are configured.
pub const DEFAULT_ROOT_NAME: &str = "files";

/// Resolved sharing options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareOptions {
    /// Package name; the provider authority is `<package_name>.provider`
    pub package_name: String,

    /// Action set on newly built intents
    pub action: String,

    /// Roots served by the provider
    pub roots: Vec<ProviderRoot>,
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            action: ACTION_VIEW.to_string(),
            roots: vec![ProviderRoot::new(DEFAULT_ROOT_NAME, PathBuf::from("."))],
        }
    }
}

impl ShareOptions {
    /// The authority the provider is registered under.
    #[must_use]
    pub fn authority(&self) -> String {
        authority_for(&self.package_name)
    }

    /// Build a [`Context`] whose resolver serves this package's provider.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidRoot`] if a configured root is unusable.
    pub fn context(&self) -> Result<Context, ShareError> {
        let provider = FileProvider::new(self.authority(), self.roots.clone())?;
        let resolver = LocalResolver::new().with_provider(provider);
        Ok(Context::new(self.package_name.clone(), Arc::new(resolver)))
    }
}
