//! Builder for constructing pickers.

use crate::builder::error::BuildError;
use crate::core::{ScoringScope, SelectionPolicy};
use crate::engine::{FairPicker, PickerConfig};
use std::time::Duration;

/// Builder for a validated [`PickerConfig`] and [`FairPicker`].
///
/// # Example
///
/// ```
/// use fairpick::builder::PickerBuilder;
/// use fairpick::core::{ScoringScope, SelectionPolicy};
///
/// let picker = PickerBuilder::new()
///     .policy(SelectionPolicy::Uniform)
///     .scope(ScoringScope::PickedOnly)
///     .retention(5)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(picker.config().retention, 5);
/// ```
pub struct PickerBuilder {
    config: PickerConfig,
    seed: Option<u64>,
}

impl PickerBuilder {
    /// Create a builder starting from the default configuration.
    pub fn new() -> Self {
        Self {
            config: PickerConfig::default(),
            seed: None,
        }
    }

    /// Start from an existing configuration, e.g. one loaded from JSON.
    pub fn from_config(config: PickerConfig) -> Self {
        Self { config, seed: None }
    }

    pub fn policy(mut self, policy: SelectionPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn scope(mut self, scope: ScoringScope) -> Self {
        self.config.scope = scope;
        self
    }

    /// Pick timestamps kept per entity.
    pub fn retention(mut self, n: usize) -> Self {
        self.config.retention = n;
        self
    }

    pub fn session_window(mut self, window: Duration) -> Self {
        self.config.session_window = window;
        self
    }

    pub fn recent_limit(mut self, n: usize) -> Self {
        self.config.recent_limit = n;
        self
    }

    /// Save attempts before a conflicted pick is given up.
    pub fn max_save_attempts(mut self, n: usize) -> Self {
        self.config.max_save_attempts = n;
        self
    }

    /// Fix the random seed (for tests and replays).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and return the configuration.
    pub fn build_config(self) -> Result<PickerConfig, BuildError> {
        validate(&self.config)?;
        Ok(self.config)
    }

    /// Validate and build the picker.
    pub fn build(self) -> Result<FairPicker, BuildError> {
        validate(&self.config)?;
        Ok(match self.seed {
            Some(seed) => FairPicker::with_seed(self.config, seed),
            None => FairPicker::new(self.config),
        })
    }
}

impl Default for PickerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(config: &PickerConfig) -> Result<(), BuildError> {
    if config.retention == 0 {
        return Err(BuildError::ZeroRetention);
    }
    if config.max_save_attempts == 0 {
        return Err(BuildError::ZeroSaveAttempts);
    }
    if config.session_window.is_zero() {
        return Err(BuildError::ZeroSessionWindow);
    }
    if config.recent_limit == 0 {
        return Err(BuildError::ZeroRecentLimit);
    }
    Ok(())
}
