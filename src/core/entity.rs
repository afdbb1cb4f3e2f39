//! Entity identity for roster members.
//!
//! Entities are identified by plain strings (student names or ids) and
//! compared by exact string identity.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a single roster member.
///
/// Two identifiers are the same entity only if their strings are equal;
/// no case folding or trimming is applied.
///
/// # Example
///
/// ```rust
/// use fairpick::core::EntityId;
///
/// let id = EntityId::from("Alice Johnson");
/// assert_eq!(id.as_str(), "Alice Johnson");
/// assert_eq!(id.short_name(), "Alice J.");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Compact display form: first name plus last initial.
    ///
    /// "Alice Mary Johnson" becomes "Alice J.", single words are returned
    /// unchanged.
    pub fn short_name(&self) -> String {
        let parts: Vec<&str> = self.0.split_whitespace().collect();
        match parts.as_slice() {
            [] => String::new(),
            [only] => (*only).to_string(),
            [first, .., last] => {
                let initial: String = last.chars().take(1).flat_map(char::to_uppercase).collect();
                format!("{first} {initial}.")
            }
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&EntityId> for EntityId {
    fn from(id: &EntityId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
