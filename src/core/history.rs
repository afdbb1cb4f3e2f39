//! Pick history tracking.
//!
//! Provides immutable per-entity pick counts for a tracking period. Every
//! update returns a new history, the input is never modified.

use super::entity::EntityId;
use super::roster::Roster;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default number of pick timestamps retained per entity.
pub const DEFAULT_RETENTION: usize = 10;

/// A selection round. Histories are kept per UTC calendar day.
///
/// # Example
///
/// ```rust
/// use fairpick::core::TrackingPeriod;
/// use chrono::NaiveDate;
///
/// let period = TrackingPeriod::new(NaiveDate::from_ymd_opt(2024, 9, 3).unwrap());
/// assert_eq!(period.key(), "picker_history_2024-09-03");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingPeriod(NaiveDate);

impl TrackingPeriod {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The period containing the current instant.
    pub fn today() -> Self {
        Self::containing(Utc::now())
    }

    /// The period containing the given instant.
    pub fn containing(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Storage key for this period.
    pub fn key(&self) -> String {
        format!("picker_history_{}", self.0.format("%Y-%m-%d"))
    }
}

impl fmt::Display for TrackingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Pick statistics for one entity.
///
/// Timestamps are seconds since the Unix epoch. `picks` holds the most
/// recent pick times, oldest first, bounded by the retention limit used when
/// recording. A missing `count` reads as 0 and `lastPicked` accepts
/// fractional seconds, truncated to whole seconds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStats {
    #[serde(default)]
    pub count: u32,
    #[serde(
        rename = "lastPicked",
        default,
        deserialize_with = "deserialize_epoch_seconds"
    )]
    pub last_picked: Option<i64>,
    #[serde(default)]
    pub picks: Vec<i64>,
}

impl EntityStats {
    pub fn last_picked_at(&self) -> Option<DateTime<Utc>> {
        self.last_picked
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn was_picked(&self) -> bool {
        self.count > 0
    }
}

// Binary formats store whole seconds as written; text formats may carry
// float timestamps from other writers.
fn deserialize_epoch_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    if deserializer.is_human_readable() {
        let secs = Option::<f64>::deserialize(deserializer)?;
        Ok(secs.map(|secs| secs.trunc() as i64))
    } else {
        Option::<i64>::deserialize(deserializer)
    }
}

/// One selection event, derived from the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRecord {
    pub entity: EntityId,
    pub timestamp: DateTime<Utc>,
    pub period: TrackingPeriod,
}

/// Per-entity pick counts for one tracking period.
///
/// Serializes as a plain JSON object keyed by entity id:
///
/// ```json
/// { "Alice": { "count": 2, "lastPicked": 1717000000, "picks": [1716990000, 1717000000] } }
/// ```
///
/// Absent entities read as `count: 0, lastPicked: null`.
///
/// # Example
///
/// ```rust
/// use fairpick::core::HistoryState;
/// use chrono::Utc;
///
/// let history = HistoryState::new();
/// let updated = history.record_pick("Alice", Utc::now(), 10);
///
/// assert_eq!(updated.count("Alice"), 1);
/// assert_eq!(history.count("Alice"), 0); // Original unchanged
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryState {
    entries: BTreeMap<EntityId, EntityStats>,
}

impl HistoryState {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entities present, including explicit zero entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&EntityStats> {
        self.entries.get(id)
    }

    /// Stats for an entity, defaulting to zero for unknown ids.
    pub fn stats(&self, id: &str) -> EntityStats {
        self.entries.get(id).cloned().unwrap_or_default()
    }

    pub fn count(&self, id: &str) -> u32 {
        self.entries.get(id).map_or(0, |stats| stats.count)
    }

    /// Counts of every present entity, in id order.
    pub fn counts(&self) -> Vec<u32> {
        self.entries.values().map(|stats| stats.count).collect()
    }

    pub fn total_picks(&self) -> u64 {
        self.entries.values().map(|stats| u64::from(stats.count)).sum()
    }

    pub fn max_count(&self) -> u32 {
        self.entries.values().map(|stats| stats.count).max().unwrap_or(0)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&EntityId, &EntityStats)> {
        self.entries.iter()
    }

    /// Record a pick, returning a new history.
    ///
    /// Increments the count, sets `lastPicked`, and appends the timestamp to
    /// `picks`, keeping at most `retention` of them.
    pub fn record_pick(&self, id: impl Into<EntityId>, at: DateTime<Utc>, retention: usize) -> Self {
        let mut entries = self.entries.clone();
        let stats = entries.entry(id.into()).or_default();
        let secs = at.timestamp();

        stats.count = stats.count.saturating_add(1);
        stats.last_picked = Some(secs);
        stats.picks.push(secs);
        if stats.picks.len() > retention {
            let excess = stats.picks.len() - retention;
            stats.picks.drain(..excess);
        }

        Self { entries }
    }

    /// Add a zero entry for every roster member not yet present.
    ///
    /// Existing entries are left untouched.
    pub fn with_roster(&self, roster: &Roster) -> Self {
        let mut entries = self.entries.clone();
        for id in roster {
            entries.entry(id.clone()).or_default();
        }
        Self { entries }
    }

    /// Most recent picks across all entities, newest first.
    pub fn recent_picks(&self, limit: usize) -> Vec<PickRecord> {
        let mut records = self.records();
        records.reverse();
        records.truncate(limit);
        records
    }

    /// Picks at or after `since`, oldest first.
    pub fn picks_since(&self, since: DateTime<Utc>) -> Vec<PickRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.timestamp >= since)
            .collect()
    }

    // Oldest first; ties ordered by entity id.
    fn records(&self) -> Vec<PickRecord> {
        let mut records: Vec<PickRecord> = self
            .entries
            .iter()
            .flat_map(|(id, stats)| {
                stats.picks.iter().filter_map(move |secs| {
                    DateTime::from_timestamp(*secs, 0).map(|timestamp| PickRecord {
                        entity: id.clone(),
                        timestamp,
                        period: TrackingPeriod::containing(timestamp),
                    })
                })
            })
            .collect();
        records.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.entity.cmp(&b.entity))
        });
        records
    }
}

impl FromIterator<(EntityId, EntityStats)> for HistoryState {
    fn from_iter<T: IntoIterator<Item = (EntityId, EntityStats)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Build a history from plain `(id, count)` pairs.
///
/// Mostly useful for tests and fixtures; `lastPicked` is left empty.
impl<'a> FromIterator<(&'a str, u32)> for HistoryState {
    fn from_iter<T: IntoIterator<Item = (&'a str, u32)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(id, count)| {
                (
                    EntityId::from(id),
                    EntityStats {
                        count,
                        ..EntityStats::default()
                    },
                )
            })
            .collect()
    }
}
