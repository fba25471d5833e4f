//! Build identifier selection
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Manifest   │────▶│    group    │────▶│ latest/all  │
//! │ (products)  │     │ (by major)  │     │ (per major) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  Ordering   │
//!                     │(lex/numeric)│
//!                     └─────────────┘
//! ```
//!
//! - [`ordering`]: Identifier comparison within a major version bucket
//! - [`select`]: Filtering and grouping of releases into a [`VersionMap`]

pub mod ordering;
pub mod select;

pub use ordering::VersionOrdering;
pub use select::{Selection, SelectionCriteria, VersionMap, group, select};
