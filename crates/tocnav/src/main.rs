//! tocnav CLI - toctree navigation builder.
//!
//! Provides commands for:
//! - `nav`: Print the resolved navigation of a document
//! - `render`: Print a document's title, body and navigation
//! - `check`: Check link integrity of the whole documentation tree
//! - `parse`: Dump the parsed structure of a single source file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, ParseArgs, RenderArgs};
use output::Output;

/// tocnav - reStructuredText toctree navigation builder.
#[derive(Parser)]
#[command(name = "tocnav", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved navigation of a document.
    Nav(NavArgs),
    /// Print a document's title, body and navigation.
    Render(RenderArgs),
    /// Check every document for parse errors, broken references and orphans.
    Check(CheckArgs),
    /// Parse a single source file and dump its structure.
    Parse(ParseArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Nav(args) => args.site.verbose,
            Self::Render(args) => args.site.verbose,
            Self::Check(args) => args.site.verbose,
            Self::Parse(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Nav(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Parse(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
