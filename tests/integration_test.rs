use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::{anyhow, Result};
use tempfile::NamedTempFile;

fn run_sample(report: &str) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_wallet-ledger");
    let samples = Path::new("samples");

    Ok(Command::new(binary_path)
        .arg("--wallets").arg(samples.join("wallets.csv"))
        .arg("--currencies").arg(samples.join("currencies.csv"))
        .arg("--report").arg(report)
        .arg(samples.join("requests.csv"))
        .output()?)
}

#[test]
fn test_cli_outputs_correct_final_balances() -> Result<()> {
    let output = run_sample("wallets")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("wallet,owner,name,currency,balance"));

    let balances: HashMap<String, String> = lines
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            (fields[0].to_string(), fields[4].to_string())
        })
        .collect();

    assert_eq!(balances.len(), 3);
    assert_eq!(balances.get("1").ok_or_else(|| anyhow!("wallet 1 missing from output"))?, "50000");
    assert_eq!(balances.get("2").ok_or_else(|| anyhow!("wallet 2 missing from output"))?, "13.33");
    assert_eq!(balances.get("3").ok_or_else(|| anyhow!("wallet 3 missing from output"))?, "40.80");

    Ok(())
}

#[test]
fn test_cli_outputs_transaction_table() -> Result<()> {
    let output = run_sample("transactions")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut reader = csv::Reader::from_reader(stdout.as_bytes());

    assert_eq!(
        reader.headers()?.iter().collect::<Vec<_>>(),
        vec!["id", "type", "wallet", "amount", "description", "created_at", "reference"]
    );

    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(rows.len(), 4);

    let transfers = rows.iter().filter(|row| row.get(1) == Some("transfer")).count();
    assert_eq!(transfers, 2);

    let dinner = rows.iter()
        .find(|row| row.get(4) == Some("Dinner"))
        .ok_or_else(|| anyhow!("expense row missing from output"))?;
    assert_eq!(dinner.get(1), Some("expense"));
    assert_eq!(dinner.get(3), Some("EUR 9.20"));

    Ok(())
}

#[test]
fn test_cli_fails_without_required_paths() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_wallet-ledger"))
        .env_remove("LEDGER_WALLETS")
        .env_remove("LEDGER_CURRENCIES")
        .arg("requests.csv")
        .output()?;

    assert!(!output.status.success());

    Ok(())
}

#[test]
fn test_cli_rejects_an_empty_rate_table() -> Result<()> {
    let mut currencies = NamedTempFile::new()?;
    writeln!(currencies, "code,name,rate,minor_units")?;

    let samples = Path::new("samples");
    let output = Command::new(env!("CARGO_BIN_EXE_wallet-ledger"))
        .arg("--wallets").arg(samples.join("wallets.csv"))
        .arg("--currencies").arg(currencies.path())
        .arg(samples.join("requests.csv"))
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}
