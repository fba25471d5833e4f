//! Versions file rewriting
//!
//! The versions file is a Gradle version catalog holding a single line such as:
//!
//! ```text
//! versionList = "IIC-213.7172.25, IIU-221.5080.212"
//! ```
//!
//! Only the quoted value of the first matching line is replaced; every other
//! byte of the file, including that line's terminator, is left untouched.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{info, warn};

use crate::error::FileError;
use crate::output::format::split_list;

/// Default field holding the verifier's IDE versions
pub const DEFAULT_FIELD: &str = "versionList";

/// A `<name> = "<value>"` assignment located by regular expression
#[derive(Debug, Clone)]
pub struct VersionListField {
    name: String,
    pattern: Regex,
}

impl VersionListField {
    pub fn new(name: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r#"(?m)^[ \t]*{}[ \t]*=[ \t]*"([^"\n]*)""#,
            regex::escape(name)
        ))?;
        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn value_match<'a>(&self, content: &'a str) -> Option<regex::Match<'a>> {
        self.pattern.captures(content).and_then(|caps| caps.get(1))
    }

    /// Returns the quoted value of the first matching line, if any
    pub fn current_value<'a>(&self, content: &'a str) -> Option<&'a str> {
        self.value_match(content).map(|m| m.as_str())
    }

    /// Replaces the quoted value of the first matching line.
    ///
    /// Indentation, spacing around `=` and anything after the closing quote
    /// are kept as they are.
    pub fn replace<'a>(&self, content: &'a str, value: &str) -> Cow<'a, str> {
        let Some(m) = self.value_match(content) else {
            return Cow::Borrowed(content);
        };

        let mut updated = String::with_capacity(content.len() - m.len() + value.len());
        updated.push_str(&content[..m.start()]);
        updated.push_str(value);
        updated.push_str(&content[m.end()..]);
        Cow::Owned(updated)
    }
}

/// Result of rewriting a versions file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The file already held the computed value, or has no matching field
    Unchanged,
    Changed {
        previous: String,
        updated: String,
        /// Identifiers present only in the new value
        added: Vec<String>,
        /// Identifiers present only in the old value
        removed: Vec<String>,
    },
}

/// Computes the outcome of setting `value` in `content`, without touching disk
pub fn rewrite_content(field: &VersionListField, content: &str, value: &str) -> RewriteOutcome {
    let Some(old_value) = field.current_value(content) else {
        warn!("No '{}' assignment found; leaving content unchanged", field.name());
        return RewriteOutcome::Unchanged;
    };

    let updated = field.replace(content, value);
    if updated == content {
        return RewriteOutcome::Unchanged;
    }

    let old_ids = split_list(old_value);
    let new_ids = split_list(value);

    RewriteOutcome::Changed {
        added: new_ids
            .iter()
            .filter(|id| !old_ids.contains(id))
            .cloned()
            .collect(),
        removed: old_ids
            .iter()
            .filter(|id| !new_ids.contains(id))
            .cloned()
            .collect(),
        previous: content.to_string(),
        updated: updated.into_owned(),
    }
}

/// Reads the versions file, replaces the field value and writes it back if it changed
pub fn rewrite_file(
    path: &Path,
    field: &VersionListField,
    value: &str,
) -> Result<RewriteOutcome, FileError> {
    let content = fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = rewrite_content(field, &content, value);

    if let RewriteOutcome::Changed { updated, .. } = &outcome {
        fs::write(path, updated).map_err(|source| FileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Updated '{}' in {}", field.name(), path.display());
    }

    Ok(outcome)
}
