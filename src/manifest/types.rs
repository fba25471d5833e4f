//! Manifest model
//!
//! Parsing is best effort: only the top-level array is required. Entries that
//! are not objects, lack a string `code` or a `releases` array are skipped, as
//! are releases without a string `build`.

use serde_json::Value;
use tracing::debug;

use crate::error::ManifestError;

/// A single release of a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Dotted build string (e.g., "221.5080.210"), if present
    pub build: Option<String>,
}

impl Release {
    pub fn new(build: impl Into<String>) -> Self {
        Self {
            build: Some(build.into()),
        }
    }
}

/// A product edition and its releases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product edition code (e.g., "IIC" for IntelliJ IDEA Community)
    pub code: String,
    pub releases: Vec<Release>,
}

impl Product {
    pub fn new(code: impl Into<String>, builds: &[&str]) -> Self {
        Self {
            code: code.into(),
            releases: builds.iter().map(|b| Release::new(*b)).collect(),
        }
    }
}

/// Parsed build manifest, in the order products appear on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub products: Vec<Product>,
}

impl Manifest {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ManifestError> {
        let root: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&root)
    }

    pub fn from_value(root: &Value) -> Result<Self, ManifestError> {
        let entries = root.as_array().ok_or_else(|| {
            ManifestError::Schema(format!(
                "expected an array of products, found {}",
                value_kind(root)
            ))
        })?;

        let products = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| parse_product(index, entry))
            .collect();

        Ok(Self { products })
    }

    pub fn release_count(&self) -> usize {
        self.products.iter().map(|p| p.releases.len()).sum()
    }
}

fn parse_product(index: usize, entry: &Value) -> Option<Product> {
    let Some(code) = entry.get("code").and_then(Value::as_str) else {
        debug!("Skipping manifest entry {} without a code", index);
        return None;
    };

    let Some(releases) = entry.get("releases").and_then(Value::as_array) else {
        debug!("Skipping product '{}' without releases", code);
        return None;
    };

    let releases = releases
        .iter()
        .map(|release| Release {
            build: release
                .get("build")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
        .collect();

    Some(Product {
        code: code.to_string(),
        releases,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
