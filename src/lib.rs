//! # fileshare
//!
//! Helpers for handing files to other applications and keeping scratch
//! directories tidy:
//!
//! - [`share`] - wrap a file in a `content://` URI, attach it to a request with
//!   its MIME type and read/write grants, and record the grant
//! - [`cleaner`] - delete the direct children of a directory
//! - [`utils`] - format byte counts as human-readable sizes
//!
//! The [`config`] and [`output`] modules back the `fileshare` command-line tool.

pub mod cleaner;
pub mod config;
pub mod output;
pub mod share;
pub mod utils;

pub use cleaner::delete_files_in_dir;
pub use config::{ClearOptions, ShareOptions};
pub use share::{file_intent, file_uri};
pub use utils::readable_file_size;
