//! `tocnav nav` command implementation.

use clap::Args;
use tocnav_config::OutputFormat;
use tocnav_site::{TocTree, render_html_with_suffixes, render_text};

use super::{FormatArg, SiteArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Document identifier (default: configured root document).
    doc: Option<String>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    #[command(flatten)]
    pub site: SiteArgs,
}

impl NavArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, site) = self.site.load(self.format)?;

        let id = self
            .doc
            .unwrap_or_else(|| config.docs_resolved.root_doc.clone());
        let trees = site.navigation(&id)?;
        let page_id = site.document(&id).map_or(id.as_str(), |doc| doc.id.as_str());

        output.data(&format_navigation(
            &trees,
            page_id,
            site.documents().suffixes(),
            config.output.format,
        )?);
        Ok(())
    }
}

/// Format resolved navigation for output.
pub(crate) fn format_navigation(
    trees: &[TocTree],
    page_id: &str,
    suffixes: &[String],
    format: OutputFormat,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Text => render_text(trees),
        OutputFormat::Json => serde_json::to_string_pretty(trees)?,
        OutputFormat::Html => render_html_with_suffixes(trees, page_id, suffixes),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tocnav_site::NavNode;

    use super::*;

    fn suffixes() -> Vec<String> {
        vec![".rst".to_owned()]
    }

    fn trees() -> Vec<TocTree> {
        vec![TocTree {
            caption: Some("About".to_owned()),
            nodes: vec![NavNode::document("about/intro", "Introduction")],
            ..TocTree::default()
        }]
    }

    #[test]
    fn test_format_text() {
        let text = format_navigation(&trees(), "index", &suffixes(), OutputFormat::Text).unwrap();
        assert_eq!(text, "About\n  - Introduction\n");
    }

    #[test]
    fn test_format_json() {
        let json = format_navigation(&trees(), "index", &suffixes(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["caption"], "About");
        assert_eq!(value[0]["nodes"][0]["id"], "about/intro");
    }

    #[test]
    fn test_format_html_links_relative_to_page() {
        let html =
            format_navigation(&trees(), "guides/setup", &suffixes(), OutputFormat::Html).unwrap();
        assert!(html.contains(r#"href="../about/intro.html""#));
    }

    #[test]
    fn test_format_html_strips_configured_suffix() {
        let trees = vec![TocTree {
            nodes: vec![NavNode::document("about/intro.md", "Introduction")],
            ..TocTree::default()
        }];
        let suffixes = vec![".md".to_owned()];

        let html = format_navigation(&trees, "index", &suffixes, OutputFormat::Html).unwrap();
        assert!(html.contains(r#"href="about/intro.html""#));
    }
}
