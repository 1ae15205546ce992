//! marcbench ingest - dataset loading tool

use anyhow::Result;
use clap::Parser;
use marcbench_common::logging::{init_logging, LogConfig, LogLevel};
use marcbench_ingest::cli::{create_spinner, Cli};
use marcbench_ingest::{DatasetCache, HubClient, IngestionCoordinator};
use serde_json::json;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("marcbench-ingest")
        .build();

    // Environment variables take precedence over the flags
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    let _guard = init_logging(&log_config)?;

    let hub = HubClient::new(&cli.hub_url)?.with_config_name(&cli.hub_config);
    let cache = DatasetCache::new();
    let coordinator = IngestionCoordinator::new(hub, cache);

    let descriptor = cli.source.into_descriptor();
    let spinner = create_spinner(&format!("Loading {} dataset...", descriptor.source));

    let result = coordinator.load_dataset(descriptor).await;
    spinner.finish_and_clear();
    let resolved = result?;

    let records = coordinator
        .records(&resolved.name)
        .map(|records| records.to_vec())
        .unwrap_or_default();
    info!(dataset = %resolved.name, records = records.len(), "Load complete");

    let preview: Vec<_> = records.iter().take(cli.preview).collect();
    let output = json!({
        "dataset": resolved,
        "count": records.len(),
        "preview": preview,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
