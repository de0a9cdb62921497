//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use std::time::Duration;

use crate::algorithm::scenario::ResultsSummary;
use crate::models::results::{ReceiptTable, Results};

/// Print the text summary of a model run
pub fn print_results_summary(results: &Results, elapsed: Duration) {
    println!(
        "Ran {} scenarios in {:?}",
        results.scenarios.len() + 1,
        elapsed
    );
    print!("{}", ResultsSummary::generate_summary(results));
}

/// Print a service receipt table
pub fn print_receipt_table(table: &ReceiptTable) {
    println!(
        "{} receipt ({:.0} arriving, mixture {:.2}):",
        table.sector, table.n_arriving, table.mixture
    );
    for service in &table.services {
        println!("  - {}: p={:.4} n={:.1}", service.service_id, service.p, service.n);
    }
    println!(
        "  - no abortion: p={:.4} n={:.1}",
        table.no_abortion.p, table.no_abortion.n
    );
}
