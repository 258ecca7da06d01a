//! Reconciling an investment account against a brokerage statement
//!
//! Stock and mutual fund accounts reconcile share quantities, not monetary
//! value: the brokerage statement lists shares bought and sold.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconcile_core::utils::MemoryStorage;
use reconcile_core::{patterns, AccountType, Ledger, ReconcileSide};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📈 Reconcile Core - Brokerage Statement Example\n");

    let mut ledger = Ledger::new(MemoryStorage::new());

    let brokerage = ledger
        .create_account(
            "acme-shares".to_string(),
            "ACME Shares".to_string(),
            AccountType::Stock,
        )
        .await?;
    ledger
        .create_account(
            "checking".to_string(),
            "Checking".to_string(),
            AccountType::Bank,
        )
        .await?;

    // Two purchases at different prices: 4 shares for 100, then 6 for 180
    for (i, (cost, shares, day)) in [(100, 4, 3), (180, 6, 17)].iter().enumerate() {
        let purchase = patterns::create_share_purchase(
            format!("buy{i}"),
            NaiveDate::from_ymd_opt(2024, 6, *day).unwrap(),
            format!("Buy {shares} ACME"),
            brokerage.id.clone(),
            "checking".to_string(),
            BigDecimal::from(*cost),
            BigDecimal::from(*shares),
        )?;
        ledger.record_transaction(purchase).await?;
    }

    let mut session = ledger
        .reconcile_session(&brokerage.id, ReconcileSide::Debit)
        .await?;
    session.refresh().await?;

    println!("Brokerage rows (amounts are share quantities):");
    for (i, row) in session.rows().iter().enumerate() {
        println!(
            "  [{}] {} {:<14} {:>8} [{}]",
            i,
            row.display_date(),
            row.description,
            row.display_amount,
            row.flag
        );
    }

    // The statement confirms both lots
    session.toggle_row(0)?;
    session.toggle_row(1)?;
    println!(
        "\nReconciled share quantity: {}",
        session.reconciled_balance()
    );

    session.commit().await?;
    println!("✅ Committed both lots as cleared");

    Ok(())
}
