//! Integration tests for fileshare
//!
//! These tests build real directory trees in temporary directories and drive
//! the public API end to end: sharing files through content URIs, clearing
//! directories, and formatting sizes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use fileshare::cleaner::{Cleaner, delete_files_in_dir};
use fileshare::config::ShareOptions;
use fileshare::config::file::FileConfig;
use fileshare::readable_file_size;
use fileshare::share::{
    ACTION_SEND, ACTION_VIEW, ContentResolver, ContentUri, Context, FileProvider, Intent,
    IntentFlags, LocalResolver, ProviderRoot, ShareError, authority_for, file_intent, file_uri,
};

const PACKAGE: &str = "me.ccrama.redditslide";

/// Helper function to create a temporary directory structure for testing
fn create_test_directory() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a file with specified content
fn create_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Helper function to create a directory
fn create_dir(path: &Path) {
    fs::create_dir_all(path).expect("Failed to create directory");
}

/// Count the direct entries of a directory
fn entry_count(path: &Path) -> usize {
    fs::read_dir(path).expect("Failed to list directory").count()
}

/// Build a context whose provider serves `images/` and `cache/` under `base`
fn create_context(base: &Path) -> (Context, Arc<LocalResolver>) {
    create_dir(&base.join("images"));
    create_dir(&base.join("cache"));

    let provider = FileProvider::new(
        authority_for(PACKAGE),
        [
            ProviderRoot::new("images", base.join("images")),
            ProviderRoot::new("cache", base.join("cache")),
        ],
    )
    .expect("Failed to create provider");

    let resolver = Arc::new(LocalResolver::new().with_provider(provider));
    (Context::new(PACKAGE, resolver.clone()), resolver)
}

// ── Sharing ─────────────────────────────────────────────────────────────

#[test]
fn test_file_intent_for_shared_file() {
    let temp_dir = create_test_directory();
    let (ctx, resolver) = create_context(temp_dir.path());
    let file = temp_dir.path().join("images").join("album").join("cat photo.jpg");
    create_file(&file, "jpeg bytes");

    let mut intent = Intent::new(ACTION_VIEW);
    let returned = file_intent(&file, &mut intent, &ctx).expect("share should succeed");
    let returned = returned.clone();

    let uri = intent.data().expect("data should be set").clone();
    assert_eq!(
        uri.to_string(),
        "content://me.ccrama.redditslide.provider/images/album/cat%20photo.jpg"
    );
    assert_eq!(intent.mime_type(), Some("image/jpeg"));
    assert!(intent.flags().contains(IntentFlags::GRANT_READ_URI_PERMISSION));
    assert!(intent.flags().contains(IntentFlags::GRANT_WRITE_URI_PERMISSION));
    assert_eq!(returned, intent);

    // The explicit grant goes to the authority as well
    assert!(resolver.has_permission(
        "me.ccrama.redditslide.provider",
        &uri,
        IntentFlags::GRANT_READ_WRITE
    ));
}

#[test]
fn test_every_file_under_roots_gets_a_uri() {
    let temp_dir = create_test_directory();
    let (ctx, _) = create_context(temp_dir.path());

    let files = [
        temp_dir.path().join("images").join("a.png"),
        temp_dir.path().join("images").join("deep").join("er").join("b.gif"),
        temp_dir.path().join("cache").join("c"),
        temp_dir.path().join("cache").join("ünïcode.txt"),
    ];

    for file in &files {
        create_file(file, "x");

        let mut intent = Intent::new(ACTION_SEND);
        file_intent(file, &mut intent, &ctx).expect("share should succeed");

        assert!(intent.data().is_some(), "{} should get a URI", file.display());
        assert_eq!(intent.flags(), IntentFlags::GRANT_READ_WRITE);
    }
}

#[test]
fn test_uri_resolves_back_to_file() {
    let temp_dir = create_test_directory();
    let (ctx, _) = create_context(temp_dir.path());
    let file = temp_dir.path().join("cache").join("100% done (final).txt");
    create_file(&file, "done");

    let uri = file_uri(&file, &ctx).expect("URI should be minted");
    let reparsed: ContentUri = uri.to_string().parse().expect("URI should parse");

    assert_eq!(
        ctx.resolver().file_for_uri(&reparsed).unwrap(),
        fs::canonicalize(&file).unwrap()
    );
    assert_eq!(ctx.resolver().get_type(&reparsed).unwrap(), "text/plain");
}

#[test]
fn test_file_outside_roots_is_rejected() {
    let temp_dir = create_test_directory();
    let (ctx, resolver) = create_context(temp_dir.path());
    let file = temp_dir.path().join("private").join("secret.txt");
    create_file(&file, "secret");

    let mut intent = Intent::new(ACTION_VIEW);
    let err = file_intent(&file, &mut intent, &ctx).expect_err("share should fail");

    assert!(matches!(err, ShareError::OutsideRoots { .. }));
    assert!(intent.data().is_none());
    assert!(intent.flags().is_empty());
    assert_eq!(resolver.grant_count(), 0);
}

#[cfg(unix)]
#[test]
fn test_symlink_escaping_roots_is_rejected() {
    let temp_dir = create_test_directory();
    let (ctx, _) = create_context(temp_dir.path());
    let secret = temp_dir.path().join("private").join("secret.txt");
    create_file(&secret, "secret");

    let link = temp_dir.path().join("images").join("innocent.txt");
    std::os::unix::fs::symlink(&secret, &link).expect("Failed to create symlink");

    let err = file_uri(&link, &ctx).expect_err("symlinked file should not be shareable");
    assert!(matches!(err, ShareError::OutsideRoots { .. }));
}

#[cfg(unix)]
#[test]
fn test_uri_through_symlink_does_not_resolve_outside_roots() {
    let temp_dir = create_test_directory();
    let (ctx, _) = create_context(temp_dir.path());
    let secret = temp_dir.path().join("private").join("secret.txt");
    create_file(&secret, "secret");

    let link = temp_dir.path().join("images").join("innocent.txt");
    std::os::unix::fs::symlink(&secret, &link).expect("Failed to create symlink");

    let uri: ContentUri = format!("content://{}/images/innocent.txt", authority_for(PACKAGE))
        .parse()
        .unwrap();
    let err = ctx
        .resolver()
        .file_for_uri(&uri)
        .expect_err("link out of the root should not resolve");
    assert!(matches!(err, ShareError::PathTraversal(_)));
    assert!(ctx.resolver().get_type(&uri).is_err());
}

#[test]
fn test_missing_file_is_rejected() {
    let temp_dir = create_test_directory();
    let (ctx, _) = create_context(temp_dir.path());

    let err = file_uri(&temp_dir.path().join("images").join("gone.png"), &ctx)
        .expect_err("missing file should fail");
    assert!(matches!(err, ShareError::Io { .. }));
}

#[test]
fn test_share_options_build_working_context() {
    let temp_dir = create_test_directory();
    let file = temp_dir.path().join("report.pdf");
    create_file(&file, "%PDF");

    let config: FileConfig = toml::from_str(&format!(
        "package_name = \"me.example.app\"\n[[share.roots]]\nname = \"docs\"\npath = {:?}\n",
        temp_dir.path().display().to_string()
    ))
    .unwrap();

    let options = ShareOptions {
        package_name: config.package_name.clone().unwrap(),
        action: ACTION_VIEW.to_string(),
        roots: config.provider_roots().unwrap(),
    };
    let ctx = options.context().unwrap();

    let mut intent = Intent::new(options.action.as_str());
    file_intent(&file, &mut intent, &ctx).unwrap();

    assert_eq!(
        intent.data().unwrap().to_string(),
        "content://me.example.app.provider/docs/report.pdf"
    );
    assert_eq!(intent.mime_type(), Some("application/pdf"));
}

// ── Directory cleanup ───────────────────────────────────────────────────

#[test]
fn test_delete_files_in_dir_empties_directory() {
    for n in [0usize, 1, 5, 25] {
        let temp_dir = create_test_directory();
        for i in 0..n {
            if i % 3 == 0 {
                create_dir(&temp_dir.path().join(format!("dir{i}")));
            } else {
                create_file(&temp_dir.path().join(format!("file{i}.tmp")), "data");
            }
        }
        assert_eq!(entry_count(temp_dir.path()), n);

        delete_files_in_dir(temp_dir.path()).expect("cleanup should succeed");

        assert_eq!(entry_count(temp_dir.path()), 0, "{n} entries should be gone");
    }
}

#[test]
fn test_delete_files_in_dir_leaves_non_empty_subdirectories() {
    let temp_dir = create_test_directory();
    create_file(&temp_dir.path().join("top.txt"), "top");
    create_file(&temp_dir.path().join("full").join("inner.txt"), "inner");

    delete_files_in_dir(temp_dir.path()).expect("cleanup should succeed");

    let remaining: Vec<PathBuf> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(remaining, vec![temp_dir.path().join("full")]);
    assert!(temp_dir.path().join("full").join("inner.txt").exists());
}

#[test]
fn test_delete_files_in_dir_on_non_directory_errors() {
    let temp_dir = create_test_directory();
    let file = temp_dir.path().join("plain.txt");
    create_file(&file, "plain");

    assert!(delete_files_in_dir(&file).is_err());
    assert!(delete_files_in_dir(&temp_dir.path().join("missing")).is_err());
}

#[test]
fn test_cleaner_reports_freed_space() {
    let temp_dir = create_test_directory();
    fs::write(temp_dir.path().join("big.bin"), vec![0u8; 3 * 1024]).unwrap();
    fs::write(temp_dir.path().join("small.bin"), vec![0u8; 512]).unwrap();

    let preview = Cleaner::clear(temp_dir.path(), true).unwrap();
    assert_eq!(preview.entries, 2);
    assert_eq!(entry_count(temp_dir.path()), 2);

    let report = Cleaner::clear(temp_dir.path(), false).unwrap();
    assert_eq!(report.removed, 2);
    assert!(report.remaining.is_empty());
    assert_eq!(report.freed, 3584);
    assert_eq!(readable_file_size(3584), "3.5 KB");
}

// ── Size formatting ─────────────────────────────────────────────────────

#[test]
fn test_readable_file_size_properties() {
    assert_eq!(readable_file_size(0), "0");
    assert_eq!(readable_file_size(-5), "0");
    assert_eq!(readable_file_size(1023), "1,023 B");
    assert_eq!(readable_file_size(1024), "1 KB");
    assert_eq!(readable_file_size(1536), "1.5 KB");
    assert_eq!(readable_file_size(1_073_741_824), "1 GB");
}

#[test]
fn test_readable_file_size_uses_every_unit() {
    let cases = [
        (500, "500 B"),
        (10 * 1024, "10 KB"),
        (5 * 1024 * 1024 + 512 * 1024, "5.5 MB"),
        (2_500 * 1024 * 1024 * 1024, "2.4 TB"),
        (1_234 * 1024 * 1024 * 1024 * 1024, "1,234 TB"),
    ];

    for (bytes, expected) in cases {
        assert_eq!(readable_file_size(bytes), expected, "for {bytes} bytes");
    }
}
