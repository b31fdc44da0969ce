use std::io::{stderr, stdout, BufWriter};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use wallet_ledger::actions::TransactionActions;
use wallet_ledger::config::{Report, Settings};
use wallet_ledger::currency::{CachedCurrencyRepository, CsvRateSource, CurrencyRepository};
use wallet_ledger::engine::AsyncEngine;
use wallet_ledger::storage::{LedgerStorage, Storage};
use wallet_ledger::views::TransactionFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    setup_logging(settings.log_level.into());

    let storage = Arc::new(LedgerStorage::from_csv(&settings.wallets)?);
    let currencies = Arc::new(CachedCurrencyRepository::new(CsvRateSource::new(settings.currencies.clone()), settings.rates_ttl()));

    let rates = currencies.details()?;
    if rates.is_empty() {
        bail!("No currencies found in {}", settings.currencies.display());
    }
    info!("Loaded [{}] currencies", rates.len());

    // Every wallet must be priced, and hold a balance its currency can express, before any request runs.
    for wallet in storage.wallets() {
        let currency = rates.get(&wallet.currency)?;

        if wallet.balance.normalize().scale() > currency.minor_units {
            bail!("Wallet [{}] balance [{}] is finer than [{}] allows", wallet.wallet_id, wallet.balance, currency.code);
        }
    }

    let actions = Arc::new(TransactionActions::new(storage, currencies));
    let engine = AsyncEngine::new(actions.clone());

    let timer = Instant::now();
    let summary = engine.run(&settings.requests).await?;
    let duration = timer.elapsed();

    info!(
        "Processed requests in: {duration:?} | applied [{}] rejected [{}] malformed [{}]",
        summary.applied, summary.rejected, summary.malformed
    );

    match settings.report {
        Report::Wallets => write_report(actions.wallet_rows())?,
        Report::Transactions => write_report(actions.rows(&TransactionFilter::default())?)?
    }

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    // stdout carries the report, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(BufWriter::new(stdout().lock()));

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;

    Ok(())
}
