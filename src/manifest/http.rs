//! HTTP manifest source

use tracing::{debug, warn};

use crate::error::FetchError;
use crate::manifest::source::ManifestSource;

/// Public list of IntelliJ platform builds, as referenced by the plugin verifier docs
pub const DEFAULT_MANIFEST_URL: &str = "https://jb.gg/intellij-platform-builds-list";

/// Manifest source issuing a single unauthenticated GET
pub struct HttpManifestSource {
    client: reqwest::Client,
    url: String,
}

impl HttpManifestSource {
    /// Creates a new HttpManifestSource for the given URL
    pub fn new(url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("build-versions/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ManifestSource for HttpManifestSource {
    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        debug!("Fetching build manifest from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!("Manifest host returned status {}: {}", status, self.url);
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes of manifest", body.len());

        Ok(body.to_vec())
    }
}
