//! Solver benchmark comparison example

use bigdecimal::BigDecimal;
use std::str::FromStr;

use reconcile_core::{BenchmarkHarness, ReconcileConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("⏱️  Reconcile Core - Solver Benchmark Example\n");

    // A deterministic corpus of cent-valued amounts; real runs would feed
    // normalized transaction amounts instead
    let corpus: Vec<BigDecimal> = (1..=400)
        .map(|i| BigDecimal::from_str(&format!("{}.{:02}", (i * 7) % 90 + 1, (i * 13) % 100)).unwrap())
        .collect();
    let targets = vec![
        BigDecimal::from_str("101.50")?,
        BigDecimal::from_str("250.25")?,
    ];

    let harness = BenchmarkHarness::with_options(vec![10, 15, 20, 100, 400], 3, 20);
    let records = harness.run(&corpus, &targets, &ReconcileConfig::default())?;

    println!("{:>10} {:>18} {:>18}", "size", "brute force", "dp");
    for record in &records {
        let brute_force = match record.brute_force {
            Some(duration) => format!("{duration:?}"),
            None => "skipped".to_string(),
        };
        println!(
            "{:>10} {:>18} {:>18}",
            record.input_size,
            brute_force,
            format!("{:?}", record.dp)
        );
    }

    println!("\nBrute force is only timed at sizes within the safety threshold;");
    println!("above it the column is skipped rather than risking an unbounded run.");

    Ok(())
}
