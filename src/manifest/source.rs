//! Source trait for fetching the raw build manifest

#[cfg(test)]
use mockall::automock;

use crate::error::FetchError;

/// Trait for fetching the raw manifest bytes
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ManifestSource: Send + Sync {
    /// Fetches the manifest as raw bytes, without interpreting them
    async fn fetch(&self) -> Result<Vec<u8>, FetchError>;
}
