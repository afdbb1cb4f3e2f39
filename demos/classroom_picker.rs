//! Classroom Picker
//!
//! This example walks through a lesson where students are called on at random
//! and the instructor keeps an eye on how evenly turns are shared.
//!
//! Key concepts:
//! - Validating a roster pasted in by hand
//! - Pure picking with `FairPicker` and an in-memory history
//! - Persisting picks through a `FileStore` with revision-checked saves
//! - Summaries with fairness rating and never-picked students
//!
//! Run with: cargo run --example classroom_picker

use fairpick::core::{compute_fairness_score, HistoryState, Roster, SelectionPolicy};
use fairpick::engine::PickerConfig;
use fairpick::shell::{pick_and_record, reset_history, summarize_history, StoreEnv};
use fairpick::store::{FileStore, StoreFormat};
use fairpick::{roster, PickerBuilder};
use stillwater::prelude::*;
use stillwater::Validation;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Classroom Picker ===\n");

    validate_pasted_roster();
    pure_lesson()?;
    persistent_lesson().await?;

    Ok(())
}

fn validate_pasted_roster() {
    println!("--- Roster validation ---");
    let pasted = ["Alice Johnson", "  ", "Bob Smith", "Alice Johnson", ""];

    match Roster::validate(pasted) {
        Validation::Success(roster) => println!("  Roster accepted: {} students", roster.len()),
        Validation::Failure(errors) => {
            println!("  Roster rejected with {} problems:", errors.len());
            for error in errors.iter() {
                println!("    - {}", error);
            }
        }
    }
    println!();
}

fn pure_lesson() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Pure picking ---");
    let class = roster!["Alice Johnson", "Bob Smith", "Carol Williams", "David Brown"];
    let mut picker = PickerBuilder::new()
        .policy(SelectionPolicy::RecencyFrequency)
        .seed(7)
        .build()?;

    let mut history = picker.reset_history();
    for round in 1..=8 {
        let outcome = picker.pick_one(&class, &history)?;
        println!(
            "  Round {}: {} (fairness {})",
            round,
            outcome.selected.short_name(),
            outcome.fairness_score
        );
        history = outcome.updated_history;
    }

    let summary = picker.summarize(&class, &history);
    println!(
        "  {} picks, score {} ({})",
        summary.total_picks, summary.fairness_score, summary.rating
    );
    for standing in &summary.standings {
        println!("    {:<16} {}", standing.entity, standing.count);
    }
    println!();
    Ok(())
}

async fn persistent_lesson() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Persistent picking ---");
    let dir = std::env::temp_dir().join("fairpick-demo");
    let store = FileStore::open(&dir, StoreFormat::Json)?;
    let env = StoreEnv::new(store);
    let class = roster!["Emma Davis", "Frank Miller", "Grace Wilson"];

    reset_history().run(&env).await?;

    for _ in 0..5 {
        let recorded = pick_and_record(class.clone(), PickerConfig::default())
            .run(&env)
            .await?;
        println!(
            "  Picked {} (revision {})",
            recorded.outcome.selected, recorded.revision
        );
    }

    let summary = summarize_history(class, PickerConfig::default())
        .run(&env)
        .await?;
    println!(
        "  Stored in {}: {} picks, score {} ({})",
        dir.display(),
        summary.total_picks,
        summary.fairness_score,
        summary.rating
    );
    if !summary.never_picked.is_empty() {
        println!("  Still waiting for a turn: {:?}", summary.never_picked);
    }
    for record in &summary.recent {
        println!("    {} at {}", record.entity, record.timestamp.format("%H:%M:%S"));
    }

    let fresh = reset_history().run(&env).await?;
    assert_eq!(compute_fairness_score(&fresh), 100);
    assert_eq!(fresh, HistoryState::new());
    println!("  History reset for the next lesson");
    Ok(())
}
