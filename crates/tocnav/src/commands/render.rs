//! `tocnav render` command implementation.

use clap::Args;
use tocnav_config::OutputFormat;
use tocnav_site::RenderedPage;

use super::{FormatArg, SiteArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document identifier (default: configured root document).
    doc: Option<String>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    #[command(flatten)]
    pub site: SiteArgs,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, site) = self.site.load(self.format)?;

        let id = self
            .doc
            .unwrap_or_else(|| config.docs_resolved.root_doc.clone());
        let page = site.render_page(&id)?;

        output.data(&format_page(
            &page,
            site.documents().suffixes(),
            config.output.format,
        )?);
        Ok(())
    }
}

fn format_page(
    page: &RenderedPage,
    suffixes: &[String],
    format: OutputFormat,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Text => page.to_text(),
        OutputFormat::Json => serde_json::to_string_pretty(page)?,
        OutputFormat::Html => page.to_html_with_suffixes(suffixes),
    })
}
