//! Build manifest layer
//!
//! The manifest is a JSON array of products, each carrying a product `code`
//! and a list of `releases` with a dotted `build` string.
//!
//! # Modules
//!
//! - [`types`]: Product and release model, tolerant parsing from raw bytes
//! - [`source`]: Trait for fetching raw manifest bytes
//! - [`http`]: HTTP implementation of the source

pub mod http;
pub mod source;
pub mod types;

pub use http::HttpManifestSource;
pub use source::ManifestSource;
pub use types::{Manifest, Product, Release};
