use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

/// Applies a requests file to a wallet ledger and writes a CSV report to stdout.
///
/// Logs go to stderr so the report can be redirected.
#[derive(Debug, Clone, Parser)]
#[command(name = "wallet-ledger", version)]
pub struct Settings {
    /// Wallets to seed the ledger with (`id,owner,name,currency,balance,overdraft`)
    #[arg(long, env = "LEDGER_WALLETS")]
    pub wallets: PathBuf,

    /// Exchange rate table (`code,name,rate,minor_units`)
    #[arg(long, env = "LEDGER_CURRENCIES")]
    pub currencies: PathBuf,

    /// Requests to apply, in order
    pub requests: PathBuf,

    #[arg(long, env = "LEDGER_LOG_LEVEL", value_enum, default_value_t = LogLevel::Error)]
    pub log_level: LogLevel,

    /// How long a loaded rate table is reused before the file is read again
    #[arg(long, env = "LEDGER_RATES_TTL_SECS", default_value_t = 300)]
    pub rates_ttl_secs: u64,

    #[arg(long, env = "LEDGER_REPORT", value_enum, default_value_t = Report::Wallets)]
    pub report: Report
}

impl Settings {
    pub fn rates_ttl(&self) -> Duration {
        Duration::from_secs(self.rates_ttl_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR
        }
    }
}

/// Which table is written to stdout after the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    Wallets,
    Transactions
}
