//! `tocnav parse` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tocnav_rst::{Document, EntryTarget, TocEntry, parse};

use crate::error::CliError;
use crate::output::Output;

/// Options shown before the opaque ones, in directive order.
const KNOWN_OPTIONS: [&str; 7] = [
    "maxdepth", "caption", "name", "numbered", "glob", "hidden", "reversed",
];

/// Dump format for the parse command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DumpFormat {
    Text,
    Json,
}

/// Arguments for the parse command.
#[derive(Args)]
pub(crate) struct ParseArgs {
    /// reStructuredText file to parse.
    file: PathBuf,

    /// Document identifier (default: file name without extension).
    #[arg(long)]
    id: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    format: DumpFormat,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ParseArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let source = std::fs::read_to_string(&self.file)?;
        let id = self.id.unwrap_or_else(|| {
            self.file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let doc = parse(&id, &source)?;

        let text = match self.format {
            DumpFormat::Text => dump_text(&doc),
            DumpFormat::Json => serde_json::to_string_pretty(&doc)?,
        };
        output.data(&text);
        Ok(())
    }
}

fn dump_text(doc: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id: {}", doc.id);
    let _ = writeln!(out, "title: {}", doc.title.as_deref().unwrap_or("(none)"));

    for block in &doc.toctrees {
        let _ = writeln!(out, "toctree (line {}):", block.line);
        let options = &block.options;
        let names = KNOWN_OPTIONS
            .iter()
            .copied()
            .chain(options.extra.keys().map(String::as_str));
        for name in names {
            match options.get(name) {
                Some(value) if value.is_empty() => {
                    let _ = writeln!(out, "  :{name}:");
                }
                Some(value) => {
                    let _ = writeln!(out, "  :{name}: {value}");
                }
                None => {}
            }
        }
        for entry in &block.entries {
            let _ = writeln!(out, "  {}", describe_entry(entry));
        }
    }

    if !doc.body.is_empty() {
        let _ = write!(out, "body:\n{}\n", doc.body);
    }
    out
}

fn describe_entry(entry: &TocEntry) -> String {
    let target = match &entry.target {
        EntryTarget::Document(reference) => reference.clone(),
        EntryTarget::Pattern(pattern) => format!("{pattern} (glob)"),
        EntryTarget::SelfRef => "self".to_owned(),
        EntryTarget::External(url) => format!("{url} (external)"),
    };
    match &entry.title {
        Some(title) => format!("{title} <{target}>"),
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_dump_text() {
        let source = "\
Guide
=====

Intro text.

.. toctree::
   :maxdepth: 2
   :glob:
   :titlesonly:

   self
   Setup <setup>
   api/*
   https://example.com
";
        let doc = parse("index", source).unwrap();

        assert_eq!(
            dump_text(&doc),
            "\
id: index
title: Guide
toctree (line 6):
  :maxdepth: 2
  :glob:
  :titlesonly:
  self
  Setup <setup>
  api/* (glob)
  https://example.com (external)
body:
Intro text.
"
        );
    }

    #[test]
    fn test_dump_text_untitled() {
        let doc = parse("notes", "Just text.\n").unwrap();
        assert_eq!(dump_text(&doc), "id: notes\ntitle: (none)\nbody:\nJust text.\n");
    }
}
