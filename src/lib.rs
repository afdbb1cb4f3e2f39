//! Fairpick: A pure functional fair-selection engine
//!
//! Fairpick picks one student at a time from a class roster and keeps
//! track of how evenly picks are spread. It follows a "pure core, imperative
//! shell" design: picking and scoring are pure functions over immutable
//! values, while persistence is isolated behind a store trait and Stillwater
//! effects.
//!
//! # Core Concepts
//!
//! - **Roster**: Ordered set of unique entities to pick from
//! - **History**: Immutable per-period pick counts, returned anew after each pick
//! - **Fairness**: A 0-100 score derived from the spread of pick counts
//! - **Store**: Pluggable persistence with revision-checked saves
//!
//! # Example
//!
//! ```rust
//! use fairpick::core::{compute_fairness_score, HistoryState};
//! use fairpick::engine::{FairPicker, PickerConfig};
//! use fairpick::roster;
//!
//! let class = roster!["Alice", "Bob", "Carol"];
//! let mut picker = FairPicker::with_seed(PickerConfig::default(), 7);
//!
//! let outcome = picker.pick_one(&class, &HistoryState::new()).unwrap();
//! assert!(class.contains(outcome.selected.as_str()));
//! assert_eq!(
//!     outcome.fairness_score,
//!     compute_fairness_score(&outcome.updated_history)
//! );
//!
//! let fresh = picker.reset_history();
//! assert_eq!(compute_fairness_score(&fresh), 100);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod shell;
pub mod store;

// Re-export commonly used types
pub use builder::PickerBuilder;
pub use crate::core::{compute_fairness_score, EntityId, HistoryState, PickError, Roster};
pub use engine::{pick_one, reset_history, FairPicker, PickOutcome, PickerConfig};
pub use store::{HistoryStore, StoreError};
