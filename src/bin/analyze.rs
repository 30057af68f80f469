//! Offline analysis pass over a JSON candle file.
//!
//! Usage: analyze <candles.json> [config.toml]
//!
//! The input is a JSON array of candles. The report is printed to stdout
//! as JSON; logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};

use candle_scope::config::AnalysisConfig;
use candle_scope::model::candle::Candle;
use candle_scope::pipeline::AnalysisPipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let candles_path: PathBuf = args
        .next()
        .context("usage: analyze <candles.json> [config.toml]")?
        .into();
    let config = match args.next() {
        Some(path) => AnalysisConfig::load(path.as_ref())?,
        None => AnalysisConfig::default(),
    };

    let raw = std::fs::read_to_string(&candles_path)
        .with_context(|| format!("failed to read {}", candles_path.display()))?;
    let candles: Vec<Candle> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", candles_path.display()))?;

    let mut pipeline = AnalysisPipeline::new(config);
    for candle in candles {
        if let Err(err) = pipeline.append(candle) {
            tracing::warn!(%err, "skipped candle");
        }
    }

    if let Some(last) = pipeline.window().all().last() {
        let stamp = Utc
            .timestamp_opt(last.time, 0)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| last.time.to_string());
        tracing::info!(
            candles = pipeline.window().len(),
            last = %stamp,
            "window loaded"
        );
    }

    let report = pipeline.analyze();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
