//! Manifest server test utilities

use std::path::{Path, PathBuf};

use mockito::{Mock, Server, ServerGuard};
use serde_json::{Value, json};

use build_versions::config::Config;
use build_versions::manifest::HttpManifestSource;
use build_versions::output::OutputMode;

pub const MANIFEST_PATH: &str = "/intellij-platform-builds-list";

/// Builds a manifest body from `(code, builds)` pairs
pub fn manifest_body(products: &[(&str, &[&str])]) -> String {
    let products: Vec<Value> = products
        .iter()
        .map(|(code, builds)| {
            json!({
                "code": code,
                "name": format!("Product {}", code),
                "releases": builds
                    .iter()
                    .map(|build| json!({ "build": build, "type": "release" }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    Value::Array(products).to_string()
}

/// Starts a server answering the manifest path once with the given body
pub async fn serve_manifest(body: &str) -> (ServerGuard, Mock) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", MANIFEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
    (server, mock)
}

pub fn source_for(server: &ServerGuard) -> HttpManifestSource {
    HttpManifestSource::new(&manifest_url(server)).unwrap()
}

pub fn manifest_url(server: &ServerGuard) -> String {
    format!("{}{}", server.url(), MANIFEST_PATH)
}

pub fn rewrite_config(server: &ServerGuard, versions_file: &Path) -> Config {
    let mut config = Config {
        manifest_url: manifest_url(server),
        ..Default::default()
    };
    config.output.versions_file = PathBuf::from(versions_file);
    config
}

pub fn print_config(server: &ServerGuard) -> Config {
    let mut config = Config {
        manifest_url: manifest_url(server),
        ..Default::default()
    };
    config.output.mode = OutputMode::Print;
    config
}
