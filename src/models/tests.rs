use super::{DisplayType, Transaction, TransactionType, Wallet};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::errors::WalletError;
use crate::types::CurrencyCode;

fn create_wallet(wallet_id: u32, currency: &str, balance: &str) -> Result<Wallet> {
    Ok(Wallet::new(wallet_id, 1, format!("Wallet {wallet_id}"), CurrencyCode::from_str(currency)?)
        .with_balance(Decimal::from_str(balance)?))
}

#[test]
fn test_income_increases_balance_by_amount() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "10.50")?;
    let transaction = wallet.income(1, Decimal::from_str("4.25")?, Some("Salary".to_string()))?;

    assert_eq!(wallet.balance, Decimal::from_str("14.75")?);
    assert_eq!(transaction.transaction_type, TransactionType::Income);
    assert_eq!(transaction.wallet_id, 1);
    assert_eq!(transaction.reference_id, None);
    assert_eq!(transaction.description.as_deref(), Some("Salary"));

    Ok(())
}

#[test]
fn test_non_positive_income_fails_with_invalid_amount() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "10")?;

    let result = wallet.income(1, Decimal::from_str("-10")?, Some("x".to_string()));
    assert!(matches!(result, Err(WalletError::InvalidAmount { .. })));

    let result = wallet.income(2, Decimal::ZERO, None);
    assert!(matches!(result, Err(WalletError::InvalidAmount { .. })));

    assert_eq!(wallet.balance, Decimal::from_str("10")?);

    Ok(())
}

#[test]
fn test_expense_decreases_balance_by_amount() -> Result<()> {
    let mut wallet = create_wallet(1, "IDR", "100000")?;
    let transaction = wallet.expense(1, Decimal::from_str("25000")?, None)?;

    assert_eq!(wallet.balance, Decimal::from_str("75000")?);
    assert_eq!(transaction.transaction_type, TransactionType::Expense);
    assert_eq!(transaction.display_type(), DisplayType::Expense);

    Ok(())
}

#[test]
fn test_expense_with_exact_funds_succeeds() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "10.00")?;
    wallet.expense(1, Decimal::from_str("10.00")?, None)?;

    assert!(wallet.balance.is_zero());

    Ok(())
}

#[test]
fn test_expense_with_insufficient_funds_fails() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "10.00")?;

    let result = wallet.expense(1, Decimal::from_str("10.01")?, None);

    assert!(matches!(result, Err(WalletError::InsufficientFunds { .. })));
    assert_eq!(wallet.balance, Decimal::from_str("10.00")?);

    Ok(())
}

#[test]
fn test_expense_on_overdraft_wallet_may_go_negative() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "5")?.with_overdraft(true);
    wallet.expense(1, Decimal::from_str("7.5")?, None)?;

    assert_eq!(wallet.balance, Decimal::from_str("-2.5")?);

    Ok(())
}

#[test]
fn test_blank_descriptions_are_stored_as_none() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "0")?;
    let transaction = wallet.income(1, Decimal::ONE, Some("   ".to_string()))?;

    assert_eq!(transaction.description, None);

    let transaction = wallet.income(2, Decimal::ONE, Some("  Gift ".to_string()))?;

    assert_eq!(transaction.description.as_deref(), Some("Gift"));

    Ok(())
}

#[test]
fn test_transfer_links_both_legs_and_moves_both_balances() -> Result<()> {
    let mut origin = create_wallet(1, "IDR", "100000")?;
    let mut destination = create_wallet(2, "USD", "1.00")?;

    let (expense, income) = origin.transfer(
        &mut destination,
        (10, 11),
        Decimal::from_str("50000")?,
        Decimal::from_str("3.33")?,
        Some("Savings".to_string())
    )?;

    assert_eq!(origin.balance, Decimal::from_str("50000")?);
    assert_eq!(destination.balance, Decimal::from_str("4.33")?);

    assert_eq!(expense.transaction_id, 10);
    assert_eq!(expense.wallet_id, 1);
    assert_eq!(expense.transaction_type, TransactionType::Expense);
    assert_eq!(expense.reference_id, Some(income.transaction_id));

    assert_eq!(income.transaction_id, 11);
    assert_eq!(income.wallet_id, 2);
    assert_eq!(income.transaction_type, TransactionType::Income);
    assert_eq!(income.reference_id, Some(expense.transaction_id));

    assert_eq!(expense.display_type(), DisplayType::Transfer);
    assert_eq!(income.display_type(), DisplayType::Transfer);
    assert_eq!(expense.created_at, income.created_at);

    Ok(())
}

#[test]
fn test_failed_transfer_leaves_both_balances_untouched() -> Result<()> {
    let mut origin = create_wallet(1, "USD", "10")?;
    let mut destination = create_wallet(2, "USD", "5")?;

    let result = origin.transfer(&mut destination, (1, 2), Decimal::from_str("20")?, Decimal::from_str("20")?, None);
    assert!(matches!(result, Err(WalletError::InsufficientFunds { .. })));

    let result = origin.transfer(&mut destination, (1, 2), Decimal::from_str("5")?, Decimal::ZERO, None);
    assert!(matches!(result, Err(WalletError::InvalidAmount { wallet_id: 2, .. })));

    assert_eq!(origin.balance, Decimal::from_str("10")?);
    assert_eq!(destination.balance, Decimal::from_str("5")?);

    Ok(())
}

#[test]
fn test_transfer_to_the_same_wallet_fails() -> Result<()> {
    let mut origin = create_wallet(1, "USD", "10")?;
    let mut copy = origin.clone();

    let result = origin.transfer(&mut copy, (1, 2), Decimal::ONE, Decimal::ONE, None);

    assert!(matches!(result, Err(WalletError::SameWallet { wallet_id: 1 })));
    assert_eq!(origin.balance, Decimal::from_str("10")?);

    Ok(())
}

#[test]
fn test_revert_undoes_income_and_expense() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "100")?;
    let income = wallet.income(1, Decimal::from_str("20")?, None)?;
    let expense = wallet.expense(2, Decimal::from_str("50")?, None)?;

    wallet.revert(&expense)?;
    assert_eq!(wallet.balance, Decimal::from_str("120")?);

    wallet.revert(&income)?;
    assert_eq!(wallet.balance, Decimal::from_str("100")?);

    Ok(())
}

#[test]
fn test_revert_of_spent_income_fails_without_overdraft() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "0")?;
    let income = wallet.income(1, Decimal::from_str("20")?, None)?;
    wallet.expense(2, Decimal::from_str("15")?, None)?;

    let result = wallet.revert(&income);

    assert!(matches!(result, Err(WalletError::InsufficientFunds { .. })));
    assert_eq!(wallet.balance, Decimal::from_str("5")?);

    Ok(())
}

#[test]
fn test_replace_applies_only_the_difference() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "0")?;
    let income = wallet.income(1, Decimal::from_str("100")?, None)?;
    wallet.expense(2, Decimal::from_str("90")?, None)?;

    let mut edited = income.clone();
    edited.amount = Decimal::from_str("120")?;
    wallet.replace(&income, &edited)?;

    assert_eq!(wallet.balance, Decimal::from_str("30")?);

    let mut shrunk = edited.clone();
    shrunk.amount = Decimal::from_str("50")?;
    let result = wallet.replace(&edited, &shrunk);

    assert!(matches!(result, Err(WalletError::InsufficientFunds { .. })));
    assert_eq!(wallet.balance, Decimal::from_str("30")?);

    Ok(())
}

#[test]
fn test_apply_rejects_rows_of_other_wallets() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "0")?;
    let foreign = Transaction::new(1, 2, TransactionType::Income, Decimal::ONE);

    let result = wallet.apply(&foreign);

    assert!(matches!(result, Err(WalletError::ForeignTransaction { wallet_id: 1, owner: 2, .. })));

    Ok(())
}

#[test]
fn test_balance_overflow_is_reported() -> Result<()> {
    let mut wallet = create_wallet(1, "USD", "0")?.with_balance(Decimal::MAX);

    let result = wallet.income(1, Decimal::ONE, None);

    assert!(matches!(result, Err(WalletError::Overflow { .. })));
    assert_eq!(wallet.balance, Decimal::MAX);

    Ok(())
}

#[test]
fn test_display_type_parses_filter_values() {
    assert_eq!("transfer".parse::<DisplayType>(), Ok(DisplayType::Transfer));
    assert_eq!(" Income ".parse::<DisplayType>(), Ok(DisplayType::Income));
    assert!("refund".parse::<DisplayType>().is_err());
    assert_eq!(DisplayType::Expense.to_string(), "expense");
}
