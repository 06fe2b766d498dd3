//! `tocnav check` command implementation.

use clap::Args;
use tocnav_site::CheckReport;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Do not report documents missing from every toctree.
    #[arg(long)]
    no_orphans: bool,

    #[command(flatten)]
    pub site: SiteArgs,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, site) = self.site.load(None)?;

        output.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));

        let report = site.check(&config.docs_resolved.root_doc)?;
        let orphans = config.check.orphans && !self.no_orphans;

        for line in error_lines(&report) {
            output.error(&line);
        }
        for line in orphan_lines(&report, orphans) {
            output.warning(&line);
        }

        if report.is_ok() {
            output.success(&format!(
                "Checked {} documents: no errors",
                report.documents_checked
            ));
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} error(s) in {} documents",
                report.error_count(),
                report.documents_checked
            )))
        }
    }
}

fn error_lines(report: &CheckReport) -> Vec<String> {
    report
        .parse_errors
        .iter()
        .map(ToString::to_string)
        .chain(report.broken_references.iter().map(ToString::to_string))
        .collect()
}

fn orphan_lines(report: &CheckReport, enabled: bool) -> Vec<String> {
    if !enabled {
        return Vec::new();
    }
    report
        .orphans
        .iter()
        .map(|id| format!("{id}: document isn't included in any toctree"))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn project() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        let docs = temp.path().join("source");
        fs::create_dir_all(docs.join("about")).unwrap();
        fs::create_dir_all(docs.join("_build")).unwrap();
        fs::write(
            temp.path().join("tocnav.toml"),
            "[docs]\nsource_dir = \"source\"\nexclude_patterns = [\"_build/**\"]\n",
        )
        .unwrap();
        fs::write(
            docs.join("index.rst"),
            "Guide\n=====\n\n.. toctree::\n\n   about/intro\n   about/glossary\n",
        )
        .unwrap();
        fs::write(docs.join("about/intro.rst"), "Intro\n=====\n").unwrap();
        fs::write(docs.join("drafts.rst"), "Drafts\n======\n").unwrap();
        fs::write(docs.join("_build/index.rst"), "Stale\n=====\n").unwrap();
        temp
    }

    fn site_args(temp: &tempfile::TempDir) -> SiteArgs {
        SiteArgs {
            config: Some(temp.path().join("tocnav.toml")),
            source_dir: None,
            root_doc: None,
            verbose: false,
        }
    }

    #[test]
    fn test_check_project() {
        let temp = project();
        let (config, site) = site_args(&temp).load(None).unwrap();

        let report = site.check(&config.docs_resolved.root_doc).unwrap();

        assert_eq!(report.documents_checked, 3);
        assert_eq!(
            error_lines(&report),
            vec!["index:7: toctree references missing document `about/glossary`".to_owned()]
        );
        assert_eq!(
            orphan_lines(&report, true),
            vec!["drafts: document isn't included in any toctree".to_owned()]
        );
        assert!(orphan_lines(&report, false).is_empty());
    }

    #[test]
    fn test_root_doc_override() {
        let temp = project();
        let args = SiteArgs {
            root_doc: Some("drafts".to_owned()),
            ..site_args(&temp)
        };
        let (config, site) = args.load(None).unwrap();

        let report = site.check(&config.docs_resolved.root_doc).unwrap();

        assert_eq!(report.orphans, vec!["about/intro", "index"]);
    }
}
