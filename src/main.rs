use std::path::PathBuf;

use build_versions::config::{Config, LogFormat, Overrides};
use build_versions::manifest::HttpManifestSource;
use build_versions::{app, logging};
use clap::Parser;

/// Without arguments, fetches the default build list and rewrites
/// `./gradle/test-intellij.versions.toml`.
#[derive(Parser)]
#[command(name = "build-versions")]
#[command(version, about = "Select the latest IDE builds per major version for plugin verification")]
struct Cli {
    /// JSON config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Build manifest URL
    #[arg(long)]
    url: Option<String>,

    /// Allowed product codes (repeatable or comma-separated)
    #[arg(long = "code", value_delimiter = ',')]
    codes: Vec<String>,

    /// Inclusive minimum major version
    #[arg(long)]
    min_major: Option<u32>,

    /// Derive the minimum major version from `pluginSinceBuild` in this file
    #[arg(long, value_name = "GRADLE_PROPERTIES")]
    since_build_from: Option<PathBuf>,

    /// Compare dotted segments numerically instead of as strings
    #[arg(long)]
    numeric_order: bool,

    /// Emit every qualifying build instead of the latest per major version
    #[arg(long)]
    all: bool,

    /// Print the list instead of rewriting the versions file
    #[arg(long)]
    print: bool,

    /// Versions file to rewrite
    #[arg(long)]
    versions_file: Option<PathBuf>,

    /// Field holding the list in the versions file
    #[arg(long)]
    field: Option<String>,

    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn into_parts(self) -> (Option<PathBuf>, Overrides) {
        let overrides = Overrides {
            manifest_url: self.url,
            allowed_codes: self.codes,
            min_major: self.min_major,
            since_build_from: self.since_build_from,
            numeric_order: self.numeric_order,
            all: self.all,
            print: self.print,
            versions_file: self.versions_file,
            field: self.field,
            log_format: self.log_format,
            log_file: self.log_file,
        };
        (self.config, overrides)
    }
}

fn main() -> anyhow::Result<()> {
    let (config_path, overrides) = Cli::parse().into_parts();

    let config = match config_path {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    }
    .apply(overrides)?;

    let _guard = logging::init(&config.log)?;

    let source = HttpManifestSource::new(&config.manifest_url)?;

    let report = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(app::run(&config, &source))?;

    println!("{}", report);
    Ok(())
}
