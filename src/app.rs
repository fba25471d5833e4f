//! Run pipeline: fetch → parse → select → print or rewrite

use std::fmt;
use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::manifest::{Manifest, ManifestSource};
use crate::output::format::{join_field, join_plain};
use crate::output::{OutputMode, RewriteOutcome, VersionListField, rewrite_file};
use crate::selector::{Selection, group, select};

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Comma-joined identifiers
    Printed(String),
    Rewritten {
        path: PathBuf,
        outcome: RewriteOutcome,
    },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Printed(list) => write!(f, "{}", list),
            Report::Rewritten {
                path,
                outcome: RewriteOutcome::Unchanged,
            } => write!(f, "{} is unchanged.", path.display()),
            Report::Rewritten {
                path,
                outcome:
                    RewriteOutcome::Changed {
                        previous,
                        updated,
                        added,
                        removed,
                    },
            } => {
                writeln!(f, "Overwrote {}.", path.display())?;
                if !added.is_empty() {
                    writeln!(f, "Added: {}", added.join(", "))?;
                }
                if !removed.is_empty() {
                    writeln!(f, "Removed: {}", removed.join(", "))?;
                }
                writeln!(f, "Previous version:")?;
                writeln!(f, "{}", previous)?;
                writeln!(f, "Testing version:")?;
                write!(f, "{}", updated)
            }
        }
    }
}

/// Runs the whole pipeline against the given manifest source.
///
/// Nothing is written unless every earlier stage succeeded.
pub async fn run(config: &Config, source: &dyn ManifestSource) -> Result<Report, Error> {
    let bytes = source.fetch().await?;
    let manifest = Manifest::from_slice(&bytes)?;
    info!(
        "Loaded {} products with {} releases",
        manifest.products.len(),
        manifest.release_count()
    );

    let criteria = config.criteria();
    let identifiers: Vec<String> = match config.selection {
        Selection::Latest => select(&manifest.products, &criteria)?
            .into_values()
            .collect(),
        Selection::All => group(&manifest.products, &criteria)?
            .into_values()
            .flatten()
            .collect(),
    };
    info!("Selected {} identifiers", identifiers.len());

    match config.output.mode {
        OutputMode::Print => Ok(Report::Printed(join_plain(&identifiers))),
        OutputMode::Rewrite => {
            let field = VersionListField::new(&config.output.field)?;
            let path = config.output.versions_file.clone();
            let outcome = rewrite_file(&path, &field, &join_field(&identifiers))?;
            Ok(Report::Rewritten { path, outcome })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, ManifestError, SelectError};
    use crate::manifest::source::MockManifestSource;
    use crate::selector::VersionOrdering;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"[
        {"code": "IIU", "releases": [
            {"build": "222.4345.14"}, {"build": "221.5921.22"}, {"build": "213.7172.25"}
        ]},
        {"code": "IIC", "releases": [
            {"build": "222.4345.14"}, {"build": "221.6008.13"}, {"build": "212.5712.43"}
        ]},
        {"code": "PCP", "releases": [{"build": "223.1.1"}]}
    ]"#;

    fn source_with(body: &'static str) -> MockManifestSource {
        let mut source = MockManifestSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(move || Ok(body.as_bytes().to_vec()));
        source
    }

    fn print_config() -> Config {
        let mut config = Config::default();
        config.output.mode = OutputMode::Print;
        config
    }

    #[tokio::test]
    async fn run_prints_latest_identifier_per_major() {
        let report = run(&print_config(), &source_with(MANIFEST)).await.unwrap();

        assert_eq!(
            report,
            Report::Printed("IIU-222.4345.14,IIU-221.5921.22,IIU-213.7172.25".to_string())
        );
    }

    #[tokio::test]
    async fn run_prints_all_identifiers_when_selected() {
        let config = Config {
            selection: Selection::All,
            min_major: 222,
            ..print_config()
        };

        let report = run(&config, &source_with(MANIFEST)).await.unwrap();

        assert_eq!(
            report,
            Report::Printed("IIC-222.4345.14,IIU-222.4345.14".to_string())
        );
    }

    #[tokio::test]
    async fn run_rewrites_versions_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test-intellij.versions.toml");
        fs::write(&path, "[versions]\nversionList = \"IIU-213.7172.25\"\n").unwrap();
        let mut config = Config {
            ordering: VersionOrdering::Numeric,
            ..Default::default()
        };
        config.output.versions_file = path.clone();

        let report = run(&config, &source_with(MANIFEST)).await.unwrap();

        match report {
            Report::Rewritten {
                outcome: RewriteOutcome::Changed { added, removed, .. },
                ..
            } => {
                assert_eq!(added, vec!["IIU-222.4345.14", "IIU-221.5921.22"]);
                assert!(removed.is_empty());
            }
            other => panic!("expected changed report, got {:?}", other),
        }
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[versions]\nversionList = \"IIU-222.4345.14, IIU-221.5921.22, IIU-213.7172.25\"\n"
        );
    }

    #[tokio::test]
    async fn run_propagates_fetch_errors() {
        let mut source = MockManifestSource::new();
        source
            .expect_fetch()
            .returning(|| Err(FetchError::InvalidResponse("Unexpected status: 500".into())));

        let result = run(&print_config(), &source).await;

        assert!(matches!(result, Err(Error::Fetch(_))));
    }

    #[tokio::test]
    async fn run_fails_on_non_array_manifest() {
        let result = run(&print_config(), &source_with(r#"{"builds": []}"#)).await;

        assert!(matches!(result, Err(Error::Manifest(ManifestError::Schema(_)))));
    }

    #[tokio::test]
    async fn run_does_not_write_when_a_build_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("versions.toml");
        let original = "versionList = \"IIC-221.1\"\n";
        fs::write(&path, original).unwrap();
        let mut config = Config::default();
        config.output.versions_file = path.clone();

        let result = run(
            &config,
            &source_with(r#"[{"code": "IIC", "releases": [{"build": "abc.1"}]}]"#),
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::Select(SelectError::InvalidMajor { .. }))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn display_changed_report_lists_previous_and_new_content() {
        let report = Report::Rewritten {
            path: PathBuf::from("versions.toml"),
            outcome: RewriteOutcome::Changed {
                previous: "versionList = \"A-1\"\n".to_string(),
                updated: "versionList = \"B-2\"\n".to_string(),
                added: vec!["B-2".to_string()],
                removed: vec!["A-1".to_string()],
            },
        };

        assert_eq!(
            report.to_string(),
            "Overwrote versions.toml.\n\
             Added: B-2\n\
             Removed: A-1\n\
             Previous version:\n\
             versionList = \"A-1\"\n\n\
             Testing version:\n\
             versionList = \"B-2\"\n"
        );
    }

    #[test]
    fn display_unchanged_report() {
        let report = Report::Rewritten {
            path: PathBuf::from("versions.toml"),
            outcome: RewriteOutcome::Unchanged,
        };

        assert_eq!(report.to_string(), "versions.toml is unchanged.");
    }
}
