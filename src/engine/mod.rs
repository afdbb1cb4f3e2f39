//! The fair selection engine.
//!
//! Picks one entity from a roster, returns the updated history and reports
//! its fairness. Everything here is pure given a random source and the
//! current time; persistence lives in [`crate::store`] and the effectful
//! glue in [`crate::shell`].
//!
//! # Key Concepts
//!
//! - **Picking**: `pick_one` never mutates its input, it returns a new history
//! - **Deltas**: each pick is also returned as a `PickDelta` that can be merged
//!   onto a fresher history
//! - **Summaries**: dashboard statistics derived from roster and history

mod config;
mod outcome;
mod picker;

pub use config::{
    PickerConfig, DEFAULT_MAX_SAVE_ATTEMPTS, DEFAULT_RECENT_LIMIT, DEFAULT_SESSION_WINDOW,
};
pub use outcome::{PickDelta, PickOutcome, PickerSummary, Standing};
pub use picker::{apply_pick, pick_one, reset_history, summarize, FairPicker};
