//! Filtering and grouping of releases by major version

use std::num::IntErrorKind;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{trace, warn};

use crate::error::SelectError;
use crate::manifest::Product;
use crate::selector::ordering::VersionOrdering;

/// Identifiers (`"<code>-<build>"`) grouped by major version.
///
/// Major versions keep the order in which they first appear in the manifest;
/// each bucket is sorted so that its last element is the latest build.
pub type VersionMap = IndexMap<i64, Vec<String>>;

/// Which identifiers of each bucket end up in the output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Only the latest identifier of each major version
    #[default]
    Latest,
    /// Every qualifying identifier
    All,
}

/// Filter applied to manifest releases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub allowed_codes: Vec<String>,
    /// Inclusive lower bound on the major version
    pub min_major: u32,
    pub ordering: VersionOrdering,
}

impl SelectionCriteria {
    pub fn new(allowed_codes: &[&str], min_major: u32) -> Self {
        Self {
            allowed_codes: allowed_codes.iter().map(|c| c.to_string()).collect(),
            min_major,
            ordering: VersionOrdering::default(),
        }
    }

    pub fn with_ordering(mut self, ordering: VersionOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    fn allows(&self, code: &str) -> bool {
        self.allowed_codes.iter().any(|c| c == code)
    }
}

/// Groups qualifying releases into sorted buckets per major version.
///
/// Releases of products whose code is not allowed are never inspected, so a
/// malformed build there does not fail the run.
pub fn group(products: &[Product], criteria: &SelectionCriteria) -> Result<VersionMap, SelectError> {
    let mut map = VersionMap::new();

    for product in products {
        if !criteria.allows(&product.code) {
            trace!("Skipping product '{}'", product.code);
            continue;
        }

        for release in &product.releases {
            let Some(build) = release.build.as_deref() else {
                continue;
            };
            let Some(leading) = build.split('.').next() else {
                continue;
            };

            let major: i64 = match leading.parse() {
                Ok(major) => major,
                // Out of range integers are well-formed; negatives sit below any threshold
                Err(e) if *e.kind() == IntErrorKind::NegOverflow => continue,
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                    warn!("Skipping build '{}' with out of range major version", build);
                    continue;
                }
                Err(source) => {
                    return Err(SelectError::InvalidMajor {
                        build: build.to_string(),
                        source,
                    });
                }
            };

            if major < i64::from(criteria.min_major) {
                continue;
            }

            map.entry(major)
                .or_default()
                .push(format!("{}-{}", product.code, build));
        }
    }

    for identifiers in map.values_mut() {
        criteria.ordering.sort(identifiers);
    }

    Ok(map)
}

/// Returns the latest identifier per major version
pub fn select(
    products: &[Product],
    criteria: &SelectionCriteria,
) -> Result<IndexMap<i64, String>, SelectError> {
    let map = group(products, criteria)?;

    Ok(map
        .into_iter()
        .filter_map(|(major, identifiers)| identifiers.last().cloned().map(|id| (major, id)))
        .collect())
}
