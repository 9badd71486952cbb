//! Terminal rendering for command results.

use std::time::Duration;

use colored::Colorize;
use graphbench_graph::{GraphCounts, OutcomeStatus, QueryOutcome};
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a long Cypher statement runs.
pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_counts(node_label: &str, edge_label: &str, counts: &GraphCounts) {
    println!();
    println!("{}", "Graph Counts".bold());
    println!("{}", "─".repeat(40));
    println!("  {:<24} {}", format!(":{node_label}").cyan(), counts.nodes);
    println!("  {:<24} {}", format!("[:{edge_label}]").cyan(), counts.relationships);
}

pub fn print_outcomes(graph: &str, outcomes: &[QueryOutcome]) {
    println!();
    println!("{} {}", "Benchmark".bold(), graph.cyan());
    println!("{}", "─".repeat(40));

    for outcome in outcomes {
        let name = format!("{:<14}", outcome.kind.name());
        match &outcome.status {
            OutcomeStatus::Completed { size, elapsed_ms } => println!(
                "  {} {} {}",
                name.green(),
                format!("{elapsed_ms:>10.1} ms"),
                format!("{size} records").dimmed()
            ),
            OutcomeStatus::Skipped => println!("  {} {}", name.yellow(), "skipped".dimmed()),
            OutcomeStatus::Failed(reason) => {
                println!("  {} {}", name.red(), "failed".red().bold());
                println!("    {}", reason.dimmed());
            }
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    if failed > 0 {
        println!();
        println!("{} {} of {} queries failed", "!".red().bold(), failed, outcomes.len());
    }
}

pub fn completed_count(outcomes: &[QueryOutcome]) -> usize {
    outcomes
        .iter()
        .filter(|o| matches!(o.status, OutcomeStatus::Completed { .. }))
        .count()
}
