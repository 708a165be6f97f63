//! Unique identifiers for Contour entities.

use serde::{Deserialize, Serialize};

/// Unique identifier for a Task.
///
/// Ids are assigned by the engine in strictly increasing order starting at 1.
/// `TaskId::NONE` (0) marks "no task assigned yet".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Sentinel for an empty task list.
    pub const NONE: TaskId = TaskId(0);

    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` when the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for TaskId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_strictly_increasing() {
        let id = TaskId::NONE;
        assert_eq!(id.next(), Some(TaskId::new(1)));
        assert!(TaskId::new(2).next() > id.next());
    }

    #[test]
    fn test_next_at_max_is_none() {
        assert_eq!(TaskId::new(u64::MAX).next(), None);
        assert_eq!(TaskId::new(u64::MAX - 1).next(), Some(TaskId::new(u64::MAX)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id: TaskId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert!("abc".parse::<TaskId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&TaskId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
