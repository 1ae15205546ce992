//! Build automation tasks for marcbench
//!
//! Currently renders the `marcbench-ingest` command reference from its clap
//! definition.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for marcbench", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the ingest CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<marcbench_ingest::cli::Cli>();

    let content = format!(
        r#"# marcbench-ingest Reference

Generated from the CLI source code. Last updated: {}.

## Overview

`marcbench-ingest` loads one catalogue dataset, normalizes its records and
prints the resolved descriptor, the record count and a short preview as JSON.
It is the command line counterpart of `POST /api/datasets/load`.

## Quick Start

```bash
# First ten rows of a hub dataset
marcbench-ingest remote acme/catalogue-scans --limit 10

# Reproducible random subset with a renamed reference column
marcbench-ingest remote acme/catalogue-scans --sample 25 --unimarc-column marc

# Local directory of doc_* folders, named after the directory
marcbench-ingest local ./data/docs
```

## Commands

{}

## Environment Variables

- `MARCBENCH_HUB_URL` - Dataset hub base URL
- `MARCBENCH_HUB_CONFIG` - Dataset configuration read from the hub
- `LOG_LEVEL`, `LOG_FORMAT`, `LOG_OUTPUT`, `LOG_DIR` - Logging overrides
- `RUST_LOG` - Fine-grained tracing filter

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
