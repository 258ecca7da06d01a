//! Basic bank reconciliation example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconcile_core::utils::MemoryStorage;
use reconcile_core::{patterns, AccountType, Ledger, ReconcileSide};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Reconcile Core - Bank Statement Example\n");

    let mut ledger = Ledger::new(MemoryStorage::new());

    // 1. Set up accounts
    println!("📊 Setting up accounts...");
    let checking = ledger
        .create_account(
            "checking".to_string(),
            "Checking".to_string(),
            AccountType::Bank,
        )
        .await?;
    let salary = ledger
        .create_account(
            "salary".to_string(),
            "Salary".to_string(),
            AccountType::Income,
        )
        .await?;
    let rent = ledger
        .create_account("rent".to_string(), "Rent".to_string(), AccountType::Expense)
        .await?;
    println!("  ✓ Created checking, salary and rent accounts\n");

    // 2. Record a month of activity
    println!("💰 Recording transactions...");
    let paycheck = patterns::create_transfer(
        "txn001".to_string(),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        "June paycheck".to_string(),
        checking.id.clone(),
        salary.id.clone(),
        BigDecimal::from(3200),
    )?;
    ledger.record_transaction(paycheck).await?;
    println!("  ✓ Recorded: paycheck deposit of 3200");

    let rent_check = patterns::create_check_payment(
        "txn002".to_string(),
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        "June rent".to_string(),
        "117".to_string(),
        checking.id.clone(),
        rent.id.clone(),
        BigDecimal::from(1450),
    )?;
    ledger.record_transaction(rent_check).await?;
    println!("  ✓ Recorded: rent check #117 for 1450\n");

    // 3. Reconcile the deposit side against the statement
    println!("🧾 Reconciling deposits (debit side)...");
    let mut deposits = ledger
        .reconcile_session(&checking.id, ReconcileSide::Debit)
        .await?;
    deposits.refresh().await?;

    for (i, row) in deposits.rows().iter().enumerate() {
        println!(
            "  [{}] {} {:>4} {:<16} {:>10} [{}]",
            i,
            row.display_date(),
            row.reference,
            row.description,
            row.display_amount,
            row.flag
        );
    }

    // The statement shows the paycheck: mark it
    deposits.select_row(0)?;
    println!(
        "  ✓ Marked row 0; reconciled balance = {}",
        deposits.reconciled_balance()
    );

    // 4. Reconcile the withdrawal side
    println!("\n🧾 Reconciling withdrawals (credit side)...");
    let mut withdrawals = ledger
        .reconcile_session(&checking.id, ReconcileSide::Credit)
        .await?;
    withdrawals.refresh().await?;
    withdrawals.select_row(0)?;
    println!(
        "  ✓ Marked check #117; reconciled balance = {}",
        withdrawals.reconciled_balance()
    );

    // 5. Commit both sides
    deposits.commit().await?;
    withdrawals.commit().await?;
    println!("\n✅ Committed. Cleared balance is now:");
    println!("  {}", ledger.get_cleared_balance(&checking.id).await?);

    Ok(())
}
