//! Rosters of selectable entities.
//!
//! A roster is the ordered set of entities a pick is drawn from. Lenient
//! construction drops duplicates; strict validation reports every problem
//! at once using Stillwater's `Validation`.

use super::entity::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Problems found while validating a roster.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RosterError {
    #[error("Roster is empty")]
    Empty,

    #[error("Blank name at position {position}")]
    BlankName { position: usize },

    #[error("Duplicate name '{name}'")]
    Duplicate { name: String },
}

/// Ordered sequence of unique entities.
///
/// Order is preserved from construction and is the order used for
/// tie-breaking in summaries. A roster may be empty as a value, but the
/// engine refuses to pick from it.
///
/// # Example
///
/// ```rust
/// use fairpick::core::Roster;
///
/// let roster = Roster::from_names(["Alice", "Bob", "Alice", "Carol"]);
/// assert_eq!(roster.len(), 3);
/// assert_eq!(roster.get(2).map(|id| id.as_str()), Some("Carol"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EntityId>", into = "Vec<EntityId>")]
pub struct Roster {
    members: Vec<EntityId>,
}

impl Roster {
    /// Build a roster, keeping the first occurrence of each name.
    pub fn from_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<EntityId>,
    {
        let mut seen = HashSet::new();
        let members = names
            .into_iter()
            .map(Into::into)
            .filter(|id: &EntityId| seen.insert(id.clone()))
            .collect();
        Self { members }
    }

    /// Build a roster, accumulating ALL problems instead of stopping at the
    /// first one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fairpick::core::Roster;
    /// use stillwater::validation::Validation;
    ///
    /// let result = Roster::validate(["Alice", " ", "Alice"]);
    /// match result {
    ///     Validation::Failure(errors) => assert_eq!(errors.len(), 2),
    ///     Validation::Success(_) => panic!("expected failures"),
    /// }
    /// ```
    pub fn validate<I, N>(names: I) -> Validation<Roster, NonEmptyVec<RosterError>>
    where
        I: IntoIterator<Item = N>,
        N: Into<EntityId>,
    {
        let members: Vec<EntityId> = names.into_iter().map(Into::into).collect();
        let mut checks: Vec<Validation<(), NonEmptyVec<RosterError>>> = Vec::new();

        checks.push(if members.is_empty() {
            Validation::fail(RosterError::Empty)
        } else {
            Validation::success(())
        });

        let mut seen = HashSet::new();
        for (position, id) in members.iter().enumerate() {
            if id.is_blank() {
                checks.push(Validation::fail(RosterError::BlankName { position }));
            } else if !seen.insert(id.as_str()) {
                checks.push(Validation::fail(RosterError::Duplicate {
                    name: id.to_string(),
                }));
            }
        }

        Validation::all_vec(checks).map(move |_| Roster { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EntityId> {
        self.members.get(index)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|member| member.as_str() == id)
    }

    /// Position of an entity in roster order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.members.iter().position(|member| member.as_str() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityId> {
        self.members.iter()
    }

    pub fn members(&self) -> &[EntityId] {
        &self.members
    }
}

impl From<Vec<EntityId>> for Roster {
    fn from(members: Vec<EntityId>) -> Self {
        Self::from_names(members)
    }
}

impl From<Roster> for Vec<EntityId> {
    fn from(roster: Roster) -> Self {
        roster.members
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a EntityId;
    type IntoIter = std::slice::Iter<'a, EntityId>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
