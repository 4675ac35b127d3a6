//! Options controlling the `clear` command.

/// Resolved options for clearing a directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClearOptions {
    /// List what would be removed without deleting anything
    pub dry_run: bool,

    /// Ask for confirmation before deleting
    pub confirm: bool,
}
