//! Task model - a user-logged action tagged to a sphere.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::sphere::SphereId;

/// A task the user logged for one sphere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the engine
    pub id: TaskId,

    /// Free-text description
    pub text: String,

    /// Sphere the task counts towards
    pub sphere: SphereId,

    /// Completion flag
    pub done: bool,

    /// Creation date (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,
}

impl Task {
    /// Create a new, not yet completed task.
    pub fn new(id: TaskId, text: impl Into<String>, sphere: SphereId, date: NaiveDate) -> Self {
        Self {
            id,
            text: text.into(),
            sphere,
            done: false,
            date,
        }
    }

    /// Whether the task belongs on the daily list for `today`.
    pub fn is_pending_on(&self, today: NaiveDate) -> bool {
        self.date == today && !self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_task_is_not_done() {
        let task = Task::new(TaskId::new(1), "Run 5km", SphereId::Health, date("2024-03-01"));
        assert!(!task.done);
        assert!(task.is_pending_on(date("2024-03-01")));
        assert!(!task.is_pending_on(date("2024-03-02")));
    }

    #[test]
    fn test_serialized_layout() {
        let task = Task::new(TaskId::new(3), "Budget", SphereId::Finance, date("2024-03-01"));
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 3,
                "text": "Budget",
                "sphere": "finance",
                "done": false,
                "date": "2024-03-01"
            })
        );
    }
}
