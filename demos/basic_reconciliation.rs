//! Basic reconciliation usage example

use reconcile_core::utils::{normalize_targets, normalize_transactions, RawRecord};
use reconcile_core::{ClassifierOutcome, ReconcileConfig, Reconciler};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Reconcile Core - Basic Reconciliation Example\n");

    // 1. Ingest raw rows the way they arrive from a spreadsheet export
    println!("📥 Normalizing raw records...");
    let transaction_rows = vec![
        RawRecord::new(Some("$1,250.00".to_string()), "Vendor invoice".to_string()),
        RawRecord::new(Some("$89.99".to_string()), "Software license".to_string()),
        RawRecord::new(Some("$410.01".to_string()), "Consulting fee".to_string()),
        RawRecord::new(None, "Broken row from the export".to_string()),
        RawRecord::new(Some("$-75.00".to_string()), "Refund issued".to_string()),
        RawRecord::new(Some("$300.00".to_string()), "Equipment rental".to_string()),
    ];
    let target_rows = vec![
        RawRecord::new(Some("$1,250.00".to_string()), "REF-1001".to_string()),
        RawRecord::new(Some("$500.00".to_string()), "REF-1002".to_string()),
        RawRecord::new(Some("$314.15".to_string()), "REF-1003".to_string()),
    ];

    let transactions = normalize_transactions(&transaction_rows);
    let targets = normalize_targets(&target_rows);

    for transaction in &transactions {
        println!(
            "  ✓ {} {} ({})",
            transaction.id, transaction.amount, transaction.description
        );
    }
    println!(
        "  ({} of {} transaction rows survived normalization)\n",
        transactions.len(),
        transaction_rows.len()
    );

    // 2. Run the engine
    println!("⚖️  Reconciling...");
    let engine = Reconciler::with_config(ReconcileConfig::default());
    let report = engine.reconcile(&transactions, &targets)?;

    println!("  {}\n", report.summary());

    // 3. Walk the report
    println!("📋 Exact matches:");
    if report.exact_matches.is_empty() {
        println!("  (none)");
    }
    for exact in &report.exact_matches {
        println!(
            "  ✓ target {} = transaction {} ({})",
            exact.target_id, exact.transaction_id, exact.amount
        );
    }

    println!("\n📋 Subset-sum results:");
    for result in &report.results {
        if result.exists {
            println!(
                "  ✓ target {} covered by [{}] summing to {}",
                result.target_id,
                result.matched_transaction_ids.join(", "),
                result.matched_sum
            );
        } else {
            println!("  ✗ target {} has no covering subset", result.target_id);
        }
    }

    for failure in &report.failures {
        println!("  ! target {} failed: {}", failure.target_id, failure.reason);
    }

    match &report.classifier {
        ClassifierOutcome::Completed(classified) => {
            println!("\n🔍 Classifier scored {} pairs", classified.scored.len());
        }
        ClassifierOutcome::Skipped => {
            println!("\n🔍 Classifier stage skipped (none configured)");
        }
    }

    Ok(())
}
