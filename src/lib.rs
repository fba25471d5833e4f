//! Selects the latest IDE platform builds per major version and writes them
//! into the plugin verifier's versions file.
//!
//! # Modules
//!
//! - [`app`]: Pipeline wiring fetch, selection and output together
//! - [`config`]: Layered configuration (defaults, JSON file, CLI overrides)
//! - [`error`]: Error types for every stage of the pipeline
//! - [`logging`]: `tracing` subscriber setup
//! - [`manifest`]: Build manifest model and sources
//! - [`output`]: Identifier formatting and versions file rewriting
//! - [`selector`]: Grouping and ordering of build identifiers

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod selector;
