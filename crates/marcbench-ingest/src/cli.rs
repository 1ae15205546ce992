//! Command line definition for `marcbench-ingest`
//!
//! Kept in the library so `xtask` can render the CLI reference from it.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use marcbench_common::types::{DatasetDescriptor, DEFAULT_SPLIT};
use std::time::Duration;

use crate::remote::hub::{DEFAULT_HUB_CONFIG, DEFAULT_HUB_URL};

/// marcbench ingest - load a catalogue dataset and preview its records
#[derive(Parser, Debug)]
#[command(name = "marcbench-ingest")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Dataset source to load
    #[command(subcommand)]
    pub source: Source,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dataset hub base URL
    #[arg(long, env = "MARCBENCH_HUB_URL", default_value = DEFAULT_HUB_URL, global = true)]
    pub hub_url: String,

    /// Dataset configuration (subset) to read from the hub
    #[arg(long, env = "MARCBENCH_HUB_CONFIG", default_value = DEFAULT_HUB_CONFIG, global = true)]
    pub hub_config: String,

    /// Number of records to print after loading
    #[arg(long, default_value_t = 3, global = true)]
    pub preview: usize,
}

#[derive(Subcommand, Debug)]
pub enum Source {
    /// Load a tabular dataset from the dataset hub
    Remote {
        /// Dataset name on the hub (e.g. "acme/catalogue-scans")
        name: String,

        /// Split to fetch
        #[arg(short, long, default_value = DEFAULT_SPLIT)]
        split: String,

        /// Keep only the first N rows
        #[arg(short, long)]
        limit: Option<usize>,

        /// Keep a reproducible random subset of N rows (wins over --limit)
        #[arg(long)]
        sample: Option<usize>,

        /// Column holding the record identifier
        #[arg(long)]
        id_column: Option<String>,

        /// Column holding the page images
        #[arg(long)]
        image_column: Option<String>,

        /// Column holding the descriptive text
        #[arg(long)]
        metadata_column: Option<String>,

        /// Column holding the reference UNIMARC record
        #[arg(long)]
        unimarc_column: Option<String>,
    },

    /// Load a directory of doc_* folders
    Local {
        /// Root directory
        path: String,

        /// Dataset name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,
    },
}

impl Source {
    pub fn into_descriptor(self) -> DatasetDescriptor {
        match self {
            Source::Remote {
                name,
                split,
                limit,
                sample,
                id_column,
                image_column,
                metadata_column,
                unimarc_column,
            } => DatasetDescriptor {
                split,
                limit,
                sample,
                id_column,
                image_column,
                metadata_column,
                unimarc_column,
                ..DatasetDescriptor::remote(name)
            },
            Source::Local { path, name } => DatasetDescriptor::local(name.unwrap_or_default(), path),
        }
    }
}

/// Spinner shown while a load is in flight
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use marcbench_common::types::SourceKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_remote_arguments_map_to_descriptor() {
        let cli = Cli::try_parse_from([
            "marcbench-ingest",
            "remote",
            "acme/scans",
            "--split",
            "test",
            "--sample",
            "5",
            "--metadata-column",
            "ocr_text",
        ])
        .unwrap();

        let descriptor = cli.source.into_descriptor();

        assert_eq!(descriptor.source, SourceKind::Remote);
        assert_eq!(descriptor.name, "acme/scans");
        assert_eq!(descriptor.split, "test");
        assert_eq!(descriptor.sample, Some(5));
        assert_eq!(descriptor.limit, None);
        assert_eq!(descriptor.metadata_column.as_deref(), Some("ocr_text"));
    }

    #[test]
    fn test_local_name_defaults_to_empty() {
        let cli = Cli::try_parse_from(["marcbench-ingest", "local", "/data/docs", "-v"]).unwrap();

        assert!(cli.verbose);
        let descriptor = cli.source.into_descriptor();
        assert_eq!(descriptor.source, SourceKind::Local);
        assert_eq!(descriptor.name, "");
        assert_eq!(descriptor.path.as_deref(), Some("/data/docs"));
    }
}
