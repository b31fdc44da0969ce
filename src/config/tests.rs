use super::{LogLevel, Report, Settings};

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;

#[test]
fn test_settings_parse_paths_and_defaults() -> Result<()> {
    let settings = Settings::try_parse_from([
        "wallet-ledger",
        "--wallets", "wallets.csv",
        "--currencies", "currencies.csv",
        "requests.csv",
    ])?;

    assert_eq!(settings.wallets, Path::new("wallets.csv"));
    assert_eq!(settings.currencies, Path::new("currencies.csv"));
    assert_eq!(settings.requests, Path::new("requests.csv"));
    assert_eq!(settings.log_level, LogLevel::Error);
    assert_eq!(settings.report, Report::Wallets);
    assert_eq!(settings.rates_ttl(), Duration::from_secs(300));

    Ok(())
}

#[test]
fn test_settings_accept_report_level_and_ttl() -> Result<()> {
    let settings = Settings::try_parse_from([
        "wallet-ledger",
        "--wallets", "w.csv",
        "--currencies", "c.csv",
        "--log-level", "debug",
        "--rates-ttl-secs", "5",
        "--report", "transactions",
        "r.csv",
    ])?;

    assert_eq!(LevelFilter::from(settings.log_level), LevelFilter::DEBUG);
    assert_eq!(settings.report, Report::Transactions);
    assert_eq!(settings.rates_ttl(), Duration::from_secs(5));

    Ok(())
}

#[test]
fn test_settings_reject_unknown_report() {
    let result = Settings::try_parse_from([
        "wallet-ledger",
        "--wallets", "w.csv",
        "--currencies", "c.csv",
        "--report", "balances",
        "r.csv",
    ]);

    assert!(result.is_err());
}
