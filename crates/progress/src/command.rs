//! Commands dispatched from the input surface into the engine.

use contour_core::{ContourError, Date, Result, SphereId, Task, TaskId};

/// A user action the engine can apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log a new task against a sphere
    RecordTask {
        /// Task description
        text: String,
        /// Sphere the task counts towards
        sphere: SphereId,
        /// Creation date
        date: Date,
    },
    /// Flip the completion flag of a task
    ToggleTask {
        /// Task to toggle
        id: TaskId,
    },
}

impl Command {
    /// Build a record command from raw user input.
    ///
    /// # Errors
    /// - `EmptyTaskText` when `text` is blank.
    /// - `UnknownSphere` when `sphere` does not name a sphere.
    pub fn record_task(text: impl Into<String>, sphere: &str, date: Date) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ContourError::EmptyTaskText);
        }
        Ok(Command::RecordTask {
            text,
            sphere: sphere.parse()?,
            date,
        })
    }

    /// Build a toggle command.
    pub fn toggle_task(id: TaskId) -> Self {
        Command::ToggleTask { id }
    }
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A task was created
    Recorded(Task),
    /// A task's completion flag changed
    Toggled(Task),
}

impl Outcome {
    /// The task the command touched.
    pub fn task(&self) -> &Task {
        match self {
            Outcome::Recorded(task) | Outcome::Toggled(task) => task,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> Date {
        Date::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_record_task_parses_sphere() {
        let command = Command::record_task("Read a chapter", "development", today()).unwrap();
        assert_eq!(
            command,
            Command::RecordTask {
                text: "Read a chapter".to_string(),
                sphere: SphereId::Development,
                date: today(),
            }
        );
    }

    #[test]
    fn test_record_task_rejects_blank_text() {
        assert_eq!(
            Command::record_task("   \t", "health", today()),
            Err(ContourError::EmptyTaskText)
        );
    }

    #[test]
    fn test_record_task_rejects_unknown_sphere() {
        assert_eq!(
            Command::record_task("Paint", "art", today()),
            Err(ContourError::UnknownSphere("art".to_string()))
        );
    }
}
