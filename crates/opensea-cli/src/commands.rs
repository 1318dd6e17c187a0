// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Command execution.

use std::io::{self, Write};

use anyhow::{Context, Result};
use opensea_client::{BackfillOptions, NonEmptyString, OpenseaClient, OpenseaConfig};
use serde_json::Value;
use tracing::info;

use crate::cli::{BackfillArgs, Cli, Commands};

/// Resolve the client configuration from the config file, environment and flags
pub fn resolve_config(cli: &Cli) -> Result<OpenseaConfig> {
    let config =
        OpenseaConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    apply_overrides(cli, config)
}

/// Apply command-line flags on top of a loaded configuration
fn apply_overrides(cli: &Cli, mut config: OpenseaConfig) -> Result<OpenseaConfig> {
    if let Some(api_key) = &cli.api_key {
        config = config.api_key(api_key.as_str())?;
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = NonEmptyString::new(base_url.as_str()).map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}

/// Run a parsed command and print its output to stdout
pub async fn run(cli: Cli) -> Result<()> {
    let client = OpenseaClient::new(resolve_config(&cli)?)?;

    let body = match cli.command {
        Commands::Asset(args) => {
            client
                .asset(
                    args.contract,
                    &args.token_id,
                    args.account,
                    args.export.export.as_deref(),
                )
                .await?
        }
        Commands::Contract(args) => {
            client
                .contract(args.contract, args.export.export.as_deref())
                .await?
        }
        Commands::Collection(args) => {
            client
                .collection(&args.slug, args.export.export.as_deref())
                .await?
        }
        Commands::CollectionStats(args) => {
            client
                .collection_stats(&args.slug, args.export.export.as_deref())
                .await?
        }
        Commands::Assets(args) => {
            client
                .assets(&args.to_query(), args.export.export.as_deref())
                .await?
        }
        Commands::Collections(args) => {
            client
                .collections(&args.to_query(), args.export.export.as_deref())
                .await?
        }
        Commands::Events(args) => {
            client
                .events(&args.to_query(), args.export.export.as_deref())
                .await?
        }
        Commands::Bundles(args) => {
            client
                .bundles(&args.to_query(), args.export.export.as_deref())
                .await?
        }
        Commands::Backfill(args) => {
            return backfill(&client, &args, &mut io::stdout().lock()).await;
        }
    };

    print_json(&mut io::stdout().lock(), &body)
}

/// Stream backfill pages to `out`, one compact JSON document per line
pub async fn backfill<W: Write>(
    client: &OpenseaClient,
    args: &BackfillArgs,
    out: &mut W,
) -> Result<()> {
    let options = backfill_options(client.config(), args);
    let mut run =
        client.events_backfill_with(args.start, args.until, args.filter.to_query(), options)?;

    while let Some(page) = run.next_page().await? {
        serde_json::to_writer(&mut *out, &page.raw)?;
        writeln!(out)?;
        out.flush()?;
    }

    info!(
        run_id = %run.run_id(),
        pages = run.pages_fetched(),
        events = run.events_fetched(),
        "events backfill complete"
    );
    Ok(())
}

/// Backfill pacing from the configuration with command-line overrides applied
fn backfill_options(config: &OpenseaConfig, args: &BackfillArgs) -> BackfillOptions {
    let mut options = config.backfill.clone();
    if let Some(page_interval_ms) = args.page_interval_ms {
        options.page_interval_ms = page_interval_ms;
    }
    if let Some(max_retries) = args.max_retries {
        options.max_retries = max_retries;
    }
    options
}

fn print_json<W: Write>(out: &mut W, body: &Value) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, body)?;
    writeln!(out)?;
    Ok(())
}
