//! Configuration for sharing and cleanup.
//!
//! Options are resolved in layers: **CLI argument > config file > hardcoded
//! default**. The file layer lives in [`file`]; the resolved option structs
//! handed to the library live in [`share`] and [`clear`].

pub mod clear;
pub mod file;
pub mod share;

pub use clear::ClearOptions;
pub use file::FileConfig;
pub use share::{DEFAULT_PACKAGE_NAME, DEFAULT_ROOT_NAME, ShareOptions};
