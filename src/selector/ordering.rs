use std::cmp::Ordering;

use serde::Deserialize;

/// How identifiers inside a major version bucket are ordered
///
/// `Lexical` compares whole identifiers as strings, so "221.9" sorts after
/// "221.10".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrdering {
    #[default]
    Lexical,
    /// Dot-separated segments compare numerically when both are integers
    Numeric,
}

impl VersionOrdering {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            VersionOrdering::Lexical => a.cmp(b),
            VersionOrdering::Numeric => compare_segments(a, b).then_with(|| a.cmp(b)),
        }
    }

    pub fn sort(self, identifiers: &mut [String]) {
        identifiers.sort_by(|a, b| self.compare(a, b));
    }
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}
