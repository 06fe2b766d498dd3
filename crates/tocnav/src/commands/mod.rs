//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod parse;
pub(crate) mod render;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tocnav_config::{CliSettings, Config, OutputFormat};
use tocnav_site::Site;
use tocnav_storage_fs::FsStorage;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use parse::ParseArgs;
pub(crate) use render::RenderArgs;

/// Options shared by commands that load the whole documentation tree.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover tocnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Root document identifier (overrides config).
    #[arg(long)]
    root_doc: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration and every source document.
    pub(crate) fn load(&self, format: Option<FormatArg>) -> Result<(Config, Site), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            root_doc: self.root_doc.clone(),
            format: format.map(OutputFormat::from),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let docs = &config.docs_resolved;
        tracing::info!(source_dir = %docs.source_dir.display(), "Loading documents");
        let storage = FsStorage::new(docs.source_dir.clone())
            .with_suffixes(docs.source_suffix.clone())
            .with_exclude_patterns(&docs.exclude_patterns)?;
        let site = Site::load(&storage, &docs.source_suffix)?;

        Ok((config, site))
    }
}

/// Output format flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    Text,
    Json,
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
            FormatArg::Html => Self::Html,
        }
    }
}
