//! Macros for ergonomic roster construction.

/// Build a [`Roster`](crate::core::Roster) from name literals.
///
/// Duplicates are dropped, keeping the first occurrence.
///
/// # Example
///
/// ```
/// use fairpick::roster;
///
/// let class = roster!["Alice", "Bob", "Carol"];
/// assert_eq!(class.len(), 3);
///
/// let empty = roster![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! roster {
    () => {
        $crate::core::Roster::default()
    };
    ($($name:expr),+ $(,)?) => {
        $crate::core::Roster::from_names([$($crate::core::EntityId::from($name)),+])
    };
}
