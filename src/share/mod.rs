//! Sharing files with other applications through content URIs.
//!
//! A file is never handed out by path. Instead it is wrapped in a
//! `content://` URI minted by the application's [`FileProvider`], attached to
//! an [`Intent`] with its MIME type, and granted read/write permission.
//!
//! ## Main Parts
//!
//! - [`file_intent`] / [`file_uri`] - The sharing helpers
//! - [`ContentUri`] - The URI type and its encoding
//! - [`FileProvider`] / [`ProviderRoot`] - File to URI mapping under named roots
//! - [`ContentResolver`] / [`LocalResolver`] - The service that mints URIs and records grants
//! - [`Intent`] / [`IntentFlags`] - The share request
//! - [`Context`] - Package name plus resolver handle

pub mod context;
pub mod error;
pub mod intent;
pub mod mime;
pub mod provider;
pub mod resolver;
pub mod uri;

use std::path::Path;

pub use context::{Context, authority_for};
pub use error::ShareError;
pub use intent::{ACTION_SEND, ACTION_VIEW, Intent, IntentFlags};
pub use provider::{FileProvider, ProviderRoot};
pub use resolver::{ContentResolver, LocalResolver};
pub use uri::ContentUri;

/// Attach `file` to `intent` so another application can read and write it.
///
/// The intent's data and type are set to the file's content URI and MIME
/// type, and its flags are replaced with read and write grants. The URI
/// permission is also granted directly through the resolver (see
/// [`file_uri`]), since some receivers only honour one of the two.
///
/// # Errors
///
/// Returns a [`ShareError`] if the URI cannot be minted (no provider for the
/// package's authority, missing file, file outside every root) or its type
/// cannot be resolved. The intent is left untouched in that case.
///
/// # Examples
///
/// ```no_run
/// # use std::{path::Path, sync::Arc};
/// # use fileshare::share::{file_intent, Context, FileProvider, Intent, LocalResolver, ProviderRoot, ACTION_VIEW};
/// let provider = FileProvider::new("me.example.app.provider", [ProviderRoot::new("files", "/data/files")])?;
/// let ctx = Context::new("me.example.app", Arc::new(LocalResolver::new().with_provider(provider)));
///
/// let mut intent = Intent::new(ACTION_VIEW);
/// file_intent(Path::new("/data/files/cat.png"), &mut intent, &ctx)?;
/// # Ok::<(), fileshare::share::ShareError>(())
/// ```
pub fn file_intent<'a>(
    file: &Path,
    intent: &'a mut Intent,
    ctx: &Context,
) -> Result<&'a mut Intent, ShareError> {
    let uri = file_uri(file, ctx)?;
    let mime_type = ctx.resolver().get_type(&uri)?;

    intent
        .set_data_and_type(uri, mime_type)
        .set_flags(IntentFlags::GRANT_READ_WRITE);

    Ok(intent)
}

/// Mint the content URI for `file` and grant read and write on it.
///
/// The authority is `<package_name>.provider`; the grant is recorded for that
/// authority and is never revoked here.
///
/// # Errors
///
/// Returns a [`ShareError`] if no provider serves the authority or the
/// provider cannot share the file.
pub fn file_uri(file: &Path, ctx: &Context) -> Result<ContentUri, ShareError> {
    let authority = ctx.authority();
    let resolver = ctx.resolver();

    let uri = resolver.uri_for_file(&authority, file)?;
    resolver.grant_uri_permission(&authority, &uri, IntentFlags::GRANT_READ_WRITE);

    Ok(uri)
}
