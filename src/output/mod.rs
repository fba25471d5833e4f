//! Output of selected identifiers
//!
//! - [`format`]: Joining and splitting identifier lists
//! - [`rewrite`]: In-place replacement of the `versionList` field of a versions file

pub mod format;
pub mod rewrite;

pub use rewrite::{RewriteOutcome, VersionListField, rewrite_file};

use serde::Deserialize;

/// Where selected identifiers go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Print a comma-joined list to stdout
    Print,
    /// Replace the field value in the versions file
    #[default]
    Rewrite,
}
